//! Sulu Admin registration class renderer.

use suluforge_core::naming::{short_class, to_snake_case};
use suluforge_core::{EntityConfig, GeneratorResult};

use super::php::PhpFile;

pub fn render_admin(config: &EntityConfig) -> GeneratorResult<String> {
    let fqcn = config.admin_fqcn()?;
    let class_name = short_class(&fqcn).to_string();
    let namespace = format!("{}\\Admin", config.base_namespace);
    let resource_key = config.resource_key();
    let singular_snake = to_snake_case(&config.entity_name);
    let form_key = format!("{}_details", singular_snake);
    let view_base = format!("app_{}", singular_snake);
    let list_view = format!("{}.{}_list", view_base, resource_key);
    let add_form_view = format!("{}.{}_add_form", view_base, resource_key);
    let edit_form_view = format!("{}.{}_edit_form", view_base, resource_key);
    let route_segment = format!("/{}", resource_key);
    let security_context = format!("app.{}", resource_key);

    let mut file = PhpFile::new(namespace, format!("final class {} extends Admin", class_name));
    file.imports([
        "Sulu\\Bundle\\AdminBundle\\Admin\\Admin",
        "Sulu\\Bundle\\AdminBundle\\Admin\\Navigation\\NavigationItem",
        "Sulu\\Bundle\\AdminBundle\\Admin\\Navigation\\NavigationItemCollection",
        "Sulu\\Bundle\\AdminBundle\\Admin\\View\\ToolbarAction",
        "Sulu\\Bundle\\AdminBundle\\Admin\\View\\ViewBuilderFactoryInterface",
        "Sulu\\Bundle\\AdminBundle\\Admin\\View\\ViewCollection",
        "Sulu\\Component\\Localization\\Manager\\LocalizationManagerInterface",
        "Sulu\\Component\\Security\\Authorization\\PermissionTypes",
        "Sulu\\Component\\Security\\Authorization\\SecurityCheckerInterface",
    ]);

    file.line(format!(
        "    public const SECURITY_CONTEXT = '{}';",
        security_context
    ));
    file.line(format!("    public const LIST_VIEW = '{}';", list_view));
    file.line(format!("    public const ADD_FORM_VIEW = '{}';", add_form_view));
    file.line(format!("    public const EDIT_FORM_VIEW = '{}';", edit_form_view));
    file.blank();

    file.line("    public function __construct(");
    file.line("        private readonly ViewBuilderFactoryInterface $viewBuilderFactory,");
    file.line("        private readonly SecurityCheckerInterface $securityChecker,");
    file.line("        private readonly LocalizationManagerInterface $localizationManager,");
    file.line("    ) {");
    file.line("    }");
    file.blank();

    file.line("    public function configureNavigationItems(NavigationItemCollection $navigationItemCollection): void");
    file.line("    {");
    file.line("        if (!$this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::VIEW)) {");
    file.line("            return;");
    file.line("        }");
    file.blank();
    file.line(format!(
        "        $navigationItem = new NavigationItem('{}.main_navigation');",
        resource_key
    ));
    file.line("        $navigationItem->setPosition(90);");
    file.line("        $navigationItem->setIcon('su-pen');");
    file.line("        $navigationItem->setView(self::LIST_VIEW);");
    file.blank();
    file.line("        $navigationItemCollection->add($navigationItem);");
    file.line("    }");
    file.blank();

    file.line("    public function configureViews(ViewCollection $viewCollection): void");
    file.line("    {");
    file.line("        if (!$this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::VIEW)) {");
    file.line("            return;");
    file.line("        }");
    file.blank();
    file.line("        $locales = $this->localizationManager->getLocales();");
    file.line("        if (!$locales) {");
    file.line("            $locales = ['en'];");
    file.line("        }");
    file.blank();
    file.line("        $toolbarActions = [];");
    file.line("        if ($this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::ADD)) {");
    file.line("            $toolbarActions[] = new ToolbarAction('sulu_admin.add');");
    file.line("        }");
    file.line("        if ($this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::DELETE)) {");
    file.line("            $toolbarActions[] = new ToolbarAction('sulu_admin.delete');");
    file.line("        }");
    file.blank();
    file.line("        $viewCollection->add(");
    file.line("            $this->viewBuilderFactory");
    file.line(format!(
        "                ->createListViewBuilder(self::LIST_VIEW, '{}/:locale')",
        route_segment
    ));
    file.line(format!("                ->setResourceKey('{}')", resource_key));
    file.line(format!("                ->setListKey('{}')", resource_key));
    file.line("                ->addListAdapters(['table'])");
    file.line("                ->setAddView(self::ADD_FORM_VIEW)");
    file.line("                ->setEditView(self::EDIT_FORM_VIEW)");
    file.line(format!(
        "                ->setTitle('{}.main_navigation')",
        resource_key
    ));
    file.line("                ->addToolbarActions($toolbarActions)");
    file.line("                ->addLocales($locales)");
    file.line("                ->addRouterAttributesToListRequest(['locale'])");
    file.line("                ->addRouterAttributesToListMetadata(['locale'])");
    file.line("        );");
    file.blank();
    file.line("        if ($this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::ADD)) {");
    file.line("            $viewCollection->add(");
    file.line("                $this->viewBuilderFactory");
    file.line(format!(
        "                    ->createResourceTabViewBuilder(self::ADD_FORM_VIEW, '{}/:locale/add')",
        route_segment
    ));
    file.line(format!("                    ->setResourceKey('{}')", resource_key));
    file.line("                    ->setBackView(self::LIST_VIEW)");
    file.line("                    ->addLocales($locales)");
    file.line("            );");
    file.blank();
    file.line("            $viewCollection->add(");
    file.line("                $this->viewBuilderFactory");
    file.line("                    ->createFormViewBuilder(self::ADD_FORM_VIEW . '.details', '/details')");
    file.line(format!("                    ->setResourceKey('{}')", resource_key));
    file.line(format!("                    ->setFormKey('{}')", form_key));
    file.line(format!(
        "                    ->setTabTitle('{}.tab_details')",
        resource_key
    ));
    file.line("                    ->addToolbarActions([new ToolbarAction('sulu_admin.save')])");
    file.line("                    ->addRouterAttributesToFormRequest(['locale'])");
    file.line("                    ->addRouterAttributesToFormMetadata(['locale'])");
    file.line("                    ->setParent(self::ADD_FORM_VIEW)");
    file.line("            );");
    file.line("        }");
    file.blank();
    file.line("        if ($this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::EDIT)) {");
    file.line("            $viewCollection->add(");
    file.line("                $this->viewBuilderFactory");
    file.line(format!(
        "                    ->createResourceTabViewBuilder(self::EDIT_FORM_VIEW, '{}/:locale/:id')",
        route_segment
    ));
    file.line(format!("                    ->setResourceKey('{}')", resource_key));
    file.line("                    ->setBackView(self::LIST_VIEW)");
    file.line("                    ->addLocales($locales)");
    file.line("            );");
    file.blank();
    file.line("            $toolbar = [new ToolbarAction('sulu_admin.save')];");
    file.line("            if ($this->securityChecker->hasPermission(self::SECURITY_CONTEXT, PermissionTypes::DELETE)) {");
    file.line("                $toolbar[] = new ToolbarAction('sulu_admin.delete');");
    file.line("            }");
    file.blank();
    file.line("            $viewCollection->add(");
    file.line("                $this->viewBuilderFactory");
    file.line("                    ->createFormViewBuilder(self::EDIT_FORM_VIEW . '.details', '/details')");
    file.line(format!("                    ->setResourceKey('{}')", resource_key));
    file.line(format!("                    ->setFormKey('{}')", form_key));
    file.line(format!(
        "                    ->setTabTitle('{}.tab_details')",
        resource_key
    ));
    file.line("                    ->addToolbarActions($toolbar)");
    file.line("                    ->addRouterAttributesToFormRequest(['locale'])");
    file.line("                    ->addRouterAttributesToFormMetadata(['locale'])");
    file.line("                    ->addRouterAttributesToEditView(['locale'])");
    file.line("                    ->setParent(self::EDIT_FORM_VIEW)");
    file.line("            );");
    file.line("        }");
    file.line("    }");
    file.blank();

    file.line("    public function getSecurityContexts(): array");
    file.line("    {");
    file.line("        return [");
    file.line("            'Sulu' => [");
    file.line("                'Content' => [");
    file.line("                    self::SECURITY_CONTEXT => [");
    file.line("                        PermissionTypes::VIEW,");
    file.line("                        PermissionTypes::ADD,");
    file.line("                        PermissionTypes::EDIT,");
    file.line("                        PermissionTypes::DELETE,");
    file.line("                    ],");
    file.line("                ],");
    file.line("            ],");
    file.line("        ];");
    file.line("    }");

    Ok(file.render())
}
