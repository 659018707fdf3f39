//! Sulu admin REST controller renderer.
//!
//! Five actions (list, get, post, put, delete), a data-mapping helper with
//! per-type inbound coercion, a serializer, and locale resolution in the
//! order query parameter, request body, route attribute, fallback, `'en'`.

use suluforge_core::naming::{short_class, singularize, to_studly_case};
use suluforge_core::{EntityConfig, GeneratorResult, PropertyModel, PropertyType};

use super::php::PhpFile;

struct ToOneRelation {
    name: String,
    target_short: String,
    nullable: bool,
}

struct ToManyRelation {
    name: String,
    target_short: String,
    adder: String,
    remover: String,
    getter: String,
}

pub fn render_controller(config: &EntityConfig) -> GeneratorResult<String> {
    let route_base = config.controller_route_base();
    let route_prefix = config.controller_route_name_prefix();

    let fqcn = config.controller_fqcn()?;
    let class_name = short_class(&fqcn).to_string();
    let namespace = format!("{}\\Controller\\Admin", config.base_namespace);
    let entity_fqcn = config.entity_fqcn();
    let entity_short = short_class(&entity_fqcn).to_string();
    let has_translations = config.has_translations();
    let translation_properties: Vec<PropertyModel> = if has_translations {
        config.translation()?.properties.clone()
    } else {
        Vec::new()
    };

    let mut file = PhpFile::new(
        namespace,
        format!("final class {} extends AbstractRestController", class_name),
    );
    file.imports([
        "Doctrine\\DBAL\\Exception\\NotNullConstraintViolationException",
        "Doctrine\\ORM\\EntityManagerInterface",
        "FOS\\RestBundle\\View\\ViewHandlerInterface",
        "Sulu\\Component\\Rest\\AbstractRestController",
        "Sulu\\Component\\Rest\\Exception\\RestException",
        "Sulu\\Component\\Rest\\ListBuilder\\Doctrine\\DoctrineListBuilder",
        "Sulu\\Component\\Rest\\ListBuilder\\Doctrine\\DoctrineListBuilderFactoryInterface",
        "Sulu\\Component\\Rest\\ListBuilder\\Doctrine\\FieldDescriptor\\DoctrineFieldDescriptorInterface",
        "Sulu\\Component\\Rest\\ListBuilder\\Metadata\\FieldDescriptorFactoryInterface",
        "Sulu\\Component\\Rest\\ListBuilder\\PaginatedRepresentation",
        "Sulu\\Component\\Rest\\RestHelperInterface",
        "Symfony\\Component\\HttpFoundation\\Request",
        "Symfony\\Component\\HttpFoundation\\Response",
        "Symfony\\Component\\HttpKernel\\Exception\\NotFoundHttpException",
        "Symfony\\Component\\Routing\\Attribute\\Route",
        "Symfony\\Component\\Security\\Core\\Authentication\\Token\\Storage\\TokenStorageInterface",
    ]);
    file.import(entity_fqcn);
    file.attribute(format!("#[Route(path: '{}')]", route_base));

    let mut scalar_properties: Vec<PropertyModel> = Vec::new();
    let mut to_one_relations: Vec<ToOneRelation> = Vec::new();
    let mut to_many_relations: Vec<ToManyRelation> = Vec::new();
    let mut needs_datetime = false;

    for property in &config.properties {
        if property.is_relation() {
            let kind = property.relation_kind()?;
            let target = property.relation_target()?.to_string();
            file.import(target.clone());
            let target_short = short_class(&target).to_string();

            if kind.is_to_one() {
                to_one_relations.push(ToOneRelation {
                    name: property.name.clone(),
                    target_short,
                    nullable: property.is_nullable(),
                });
            } else {
                let singular_studly = to_studly_case(&singularize(&property.name));
                to_many_relations.push(ToManyRelation {
                    name: property.name.clone(),
                    target_short,
                    adder: format!("add{}", singular_studly),
                    remover: format!("remove{}", singular_studly),
                    getter: format!("get{}", to_studly_case(&property.name)),
                });
            }
            continue;
        }

        if matches!(property.ty, PropertyType::Datetime | PropertyType::Date) {
            needs_datetime = true;
        }
        scalar_properties.push(property.clone());
    }

    for property in &translation_properties {
        if matches!(property.ty, PropertyType::Datetime | PropertyType::Date) {
            needs_datetime = true;
        }
    }

    if needs_datetime {
        file.import("\\DateTimeImmutable");
    }

    let mut required_fields: Vec<String> = Vec::new();
    for property in &scalar_properties {
        if !property.is_nullable() {
            required_fields.push(property.name.clone());
        }
    }
    for relation in &to_one_relations {
        if !relation.nullable {
            required_fields.push(relation.name.clone());
        }
    }
    for property in &translation_properties {
        if !property.is_nullable() {
            required_fields.push(property.name.clone());
        }
    }
    let mut seen = std::collections::BTreeSet::new();
    required_fields.retain(|name| seen.insert(name.clone()));

    // constructor
    file.line("    public function __construct(");
    file.line("        ViewHandlerInterface $viewHandler,");
    file.line("        TokenStorageInterface $tokenStorage,");
    file.line("        private DoctrineListBuilderFactoryInterface $listBuilderFactory,");
    file.line("        private RestHelperInterface $restHelper,");
    file.line("        private FieldDescriptorFactoryInterface $fieldDescriptorFactory,");
    file.line("        private EntityManagerInterface $entityManager,");
    file.line("    ) {");
    file.line("        parent::__construct($viewHandler, $tokenStorage);");
    file.line("    }");
    file.blank();

    // cgetAction
    file.line(format!(
        "    #[Route(path: '', name: '{}_list', defaults: ['_format' => 'json'], methods: ['GET'])]",
        route_prefix
    ));
    file.line("    public function cgetAction(Request $request): Response");
    file.line("    {");
    if has_translations {
        file.line("        $locale = $this->resolveLocale($request);");
        file.blank();
    }
    file.line("        /** @var DoctrineFieldDescriptorInterface[] $fieldDescriptors */");
    file.line(format!(
        "        $fieldDescriptors = $this->fieldDescriptorFactory->getFieldDescriptors({}::RESOURCE_KEY);",
        entity_short
    ));
    file.blank();
    file.line("        /** @var DoctrineListBuilder $listBuilder */");
    file.line(format!(
        "        $listBuilder = $this->listBuilderFactory->create({}::class);",
        entity_short
    ));
    file.line("        $this->restHelper->initializeListBuilder($listBuilder, $fieldDescriptors);");
    if has_translations {
        file.line("        $listBuilder->setParameter('locale', $locale);");
    }
    file.blank();
    file.line("        $listRepresentation = new PaginatedRepresentation(");
    file.line("            $listBuilder->execute(),");
    file.line(format!("            {}::RESOURCE_KEY,", entity_short));
    file.line("            (int) $listBuilder->getCurrentPage(),");
    file.line("            (int) $listBuilder->getLimit(),");
    file.line("            $listBuilder->count()");
    file.line("        );");
    file.blank();
    file.line("        return $this->handleView($this->view($listRepresentation));");
    file.line("    }");
    file.blank();

    // getAction
    file.line(format!(
        "    #[Route(path: '/{{id}}', name: '{}_get', defaults: ['_format' => 'json'], methods: ['GET'])]",
        route_prefix
    ));
    file.line("    public function getAction(Request $request, string $id): Response");
    file.line("    {");
    file.line(format!(
        "        $entity = $this->entityManager->getRepository({}::class)->find($id);",
        entity_short
    ));
    file.line("        if (!$entity) {");
    file.line("            throw new NotFoundHttpException();");
    file.line("        }");
    file.blank();
    if has_translations {
        file.line("        $locale = $this->resolveLocale($request, $entity->getDefaultLocale());");
    } else {
        file.line("        $locale = null;");
    }
    file.line("        return $this->handleView($this->view($this->serialize($entity, $locale)));");
    file.line("    }");
    file.blank();

    // postAction
    file.line(format!(
        "    #[Route(path: '', name: '{}_post', defaults: ['_format' => 'json'], methods: ['POST'])]",
        route_prefix
    ));
    file.line("    public function postAction(Request $request): Response");
    file.line("    {");
    if has_translations {
        file.line("        $locale = $this->resolveLocale($request);");
    } else {
        file.line("        $locale = null;");
    }
    file.line("        $data = $request->toArray();");
    file.line(format!("        $entity = new {}();", entity_short));
    if has_translations {
        file.line("        $entity->setDefaultLocale($locale);");
    }
    file.line("        $this->mapDataOntoEntity($entity, $data, $locale, true);");
    file.line("        $this->entityManager->persist($entity);");
    file.line("        $this->flush();");
    file.blank();
    file.line("        return $this->handleView($this->view($this->serialize($entity, $locale), 201));");
    file.line("    }");
    file.blank();

    // putAction
    file.line(format!(
        "    #[Route(path: '/{{id}}', name: '{}_put', defaults: ['_format' => 'json'], methods: ['PUT'])]",
        route_prefix
    ));
    file.line("    public function putAction(Request $request, string $id): Response");
    file.line("    {");
    file.line(format!(
        "        $entity = $this->entityManager->getRepository({}::class)->find($id);",
        entity_short
    ));
    file.line("        if (!$entity) {");
    file.line("            throw new NotFoundHttpException();");
    file.line("        }");
    file.blank();
    if has_translations {
        file.line("        $locale = $this->resolveLocale($request, $entity->getDefaultLocale());");
    } else {
        file.line("        $locale = null;");
    }
    file.line("        $data = $request->toArray();");
    file.line("        $this->mapDataOntoEntity($entity, $data, $locale);");
    file.line("        $this->flush();");
    file.blank();
    file.line("        return $this->handleView($this->view($this->serialize($entity, $locale)));");
    file.line("    }");
    file.blank();

    // deleteAction
    file.line(format!(
        "    #[Route(path: '/{{id}}', name: '{}_delete', defaults: ['_format' => 'json'], methods: ['DELETE'])]",
        route_prefix
    ));
    file.line("    public function deleteAction(string $id): Response");
    file.line("    {");
    file.line(format!(
        "        $entity = $this->entityManager->getRepository({}::class)->find($id);",
        entity_short
    ));
    file.line("        if ($entity) {");
    file.line("            $this->entityManager->remove($entity);");
    file.line("            $this->flush();");
    file.line("        }");
    file.blank();
    file.line("        return $this->handleView($this->view(null, 204));");
    file.line("    }");
    file.blank();

    // mapDataOntoEntity
    file.line(format!(
        "    private function mapDataOntoEntity({} $entity, array $data, ?string $locale = null, bool $isCreate = false): void",
        entity_short
    ));
    file.line("    {");
    if !required_fields.is_empty() {
        let quoted: Vec<String> = required_fields
            .iter()
            .map(|field| format!("'{}'", field))
            .collect();
        file.line("        if ($isCreate) {");
        file.line(format!(
            "            $this->assertRequiredFields($data, [{}]);",
            quoted.join(", ")
        ));
        file.line("        }");
        file.blank();
    }

    let mut apply_lines: Vec<String> = Vec::new();
    for property in &scalar_properties {
        let setter = format!("set{}", to_studly_case(&property.name));
        apply_lines.extend(render_scalar_assignment(property, &setter));
    }
    for relation in &to_one_relations {
        let setter = format!("set{}", to_studly_case(&relation.name));
        apply_lines.push(format!(
            "        if (\\array_key_exists('{}', $data)) {{",
            relation.name
        ));
        apply_lines.push(format!("            $value = $data['{}'];", relation.name));
        apply_lines.push("            $reference = null;".to_string());
        apply_lines.push("            if (null !== $value && '' !== $value) {".to_string());
        apply_lines.push(format!(
            "                $reference = $this->entityManager->getReference({}::class, $value);",
            relation.target_short
        ));
        apply_lines.push("            }".to_string());
        if !relation.nullable {
            apply_lines.push("            if (null === $reference) {".to_string());
            apply_lines.push(format!(
                "                throw new RestException('The field \"{}\" cannot be null.');",
                relation.name
            ));
            apply_lines.push("            }".to_string());
        }
        apply_lines.push(format!("            $entity->{}($reference);", setter));
        apply_lines.push("        }".to_string());
        apply_lines.push(String::new());
    }
    for relation in &to_many_relations {
        apply_lines.push(format!(
            "        if (\\array_key_exists('{}', $data)) {{",
            relation.name
        ));
        apply_lines.push(format!("            $value = $data['{}'];", relation.name));
        apply_lines.push("            $items = \\is_array($value) ? $value : [];".to_string());
        apply_lines.push(format!(
            "            foreach ($entity->{}()->toArray() as $existing) {{",
            relation.getter
        ));
        apply_lines.push(format!("                $entity->{}($existing);", relation.remover));
        apply_lines.push("            }".to_string());
        apply_lines.push("            foreach ($items as $itemId) {".to_string());
        apply_lines.push("                if (null === $itemId || '' === $itemId) {".to_string());
        apply_lines.push("                    continue;".to_string());
        apply_lines.push("                }".to_string());
        apply_lines.push(format!(
            "                $reference = $this->entityManager->getReference({}::class, $itemId);",
            relation.target_short
        ));
        apply_lines.push(format!("                $entity->{}($reference);", relation.adder));
        apply_lines.push("            }".to_string());
        apply_lines.push("        }".to_string());
        apply_lines.push(String::new());
    }
    if has_translations {
        apply_lines.push("        $effectiveLocale = $locale ?? $entity->getDefaultLocale();".to_string());
        for property in &translation_properties {
            let setter = format!("set{}", to_studly_case(&property.name));
            apply_lines.extend(render_translation_assignment(property, &setter));
        }
    }
    while apply_lines.last().is_some_and(|line| line.is_empty()) {
        apply_lines.pop();
    }

    if apply_lines.is_empty() {
        file.line("        // no writable fields defined");
    } else {
        file.extend(apply_lines);
    }
    file.line("    }");
    file.blank();

    // serialize
    file.line(format!(
        "    private function serialize({} $entity, ?string $locale = null): array",
        entity_short
    ));
    file.line("    {");
    file.line("        $payload = [");
    file.line("            'id' => $entity->getId(),");
    for property in &scalar_properties {
        let getter = format!("get{}", to_studly_case(&property.name));
        let expression = match property.ty {
            PropertyType::Date | PropertyType::Datetime => {
                format!("$entity->{}()?->format('c')", getter)
            }
            _ => format!("$entity->{}()", getter),
        };
        file.line(format!("            '{}' => {},", property.name, expression));
    }
    for relation in &to_one_relations {
        let getter = format!("get{}", to_studly_case(&relation.name));
        file.line(format!(
            "            '{}' => $entity->{}()?->getId(),",
            relation.name, getter
        ));
    }
    for relation in &to_many_relations {
        file.line(format!(
            "            '{}' => array_map(static fn ($item) => $item->getId(), $entity->{}()->toArray()),",
            relation.name, relation.getter
        ));
    }
    file.line("        ];");
    if has_translations {
        file.line("        $effectiveLocale = $locale ?? $entity->getDefaultLocale();");
        file.line("        $payload['locale'] = $effectiveLocale;");
        for property in &translation_properties {
            let getter = format!("get{}", to_studly_case(&property.name));
            let expression = match property.ty {
                PropertyType::Date | PropertyType::Datetime => {
                    format!("$entity->{}($effectiveLocale)?->format('c')", getter)
                }
                _ => format!("$entity->{}($effectiveLocale)", getter),
            };
            file.line(format!("        $payload['{}'] = {};", property.name, expression));
        }
    }
    file.blank();
    file.line("        return $payload;");
    file.line("    }");
    file.blank();

    // resolveLocale
    file.line("    private function resolveLocale(Request $request, ?string $fallback = null): string");
    file.line("    {");
    file.line("        $locale = $request->query->get('locale');");
    file.line("        if (is_string($locale) && '' !== $locale) {");
    file.line("            return $locale;");
    file.line("        }");
    file.blank();
    file.line("        $locale = $request->request->get('locale');");
    file.line("        if (is_string($locale) && '' !== $locale) {");
    file.line("            return $locale;");
    file.line("        }");
    file.blank();
    file.line("        $attributeLocale = $request->attributes->get('locale');");
    file.line("        if (is_string($attributeLocale) && '' !== $attributeLocale) {");
    file.line("            return $attributeLocale;");
    file.line("        }");
    file.blank();
    file.line("        return $fallback ?? 'en';");
    file.line("    }");
    file.blank();

    // flush + violation mapping
    file.line("    private function flush(): void");
    file.line("    {");
    file.line("        try {");
    file.line("            $this->entityManager->flush();");
    file.line("        } catch (NotNullConstraintViolationException $exception) {");
    file.line("            throw new RestException($this->formatNotNullViolationMessage($exception), 0, $exception);");
    file.line("        }");
    file.line("    }");
    file.blank();
    file.line("    private function formatNotNullViolationMessage(NotNullConstraintViolationException $exception): string");
    file.line("    {");
    file.line("        $message = $exception->getMessage();");
    file.line("        if (preg_match('/column\\s+\"([^\\\"]+)\"\\s+of\\s+relation\\s+\"([^\\\"]+)\"/i', $message, $matches)) {");
    file.line("            return sprintf('The field \"%s\" is required.', $matches[1]);");
    file.line("        }");
    file.blank();
    file.line("        return 'A required field is missing.';");
    file.line("    }");
    file.blank();

    // assertRequiredFields
    file.line("    /**");
    file.line("     * @param array<string, mixed> $data");
    file.line("     * @param list<string> $fields");
    file.line("     */");
    file.line("    private function assertRequiredFields(array $data, array $fields): void");
    file.line("    {");
    file.line("        foreach ($fields as $field) {");
    file.line("            if (!array_key_exists($field, $data)) {");
    file.line("                throw new RestException(sprintf('The field \"%s\" is required.', $field));");
    file.line("            }");
    file.blank();
    file.line("            $value = $data[$field];");
    file.line("            if (null === $value) {");
    file.line("                throw new RestException(sprintf('The field \"%s\" is required.', $field));");
    file.line("            }");
    file.blank();
    file.line("            if (is_string($value) && '' === trim($value)) {");
    file.line("                throw new RestException(sprintf('The field \"%s\" is required.', $field));");
    file.line("            }");
    file.line("        }");
    file.line("    }");

    Ok(file.render())
}

/// Inbound coercion for a direct entity property, closed by `$entity->set…($value);`.
fn render_scalar_assignment(property: &PropertyModel, setter: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let nullable = property.is_nullable();

    lines.push(format!(
        "        if (\\array_key_exists('{}', $data)) {{",
        property.name
    ));
    lines.push(format!("            $value = $data['{}'];", property.name));

    if nullable {
        lines.push("            if ('' === $value) {".to_string());
        lines.push("                $value = null;".to_string());
        lines.push("            }".to_string());
    }

    lines.extend(render_value_coercion(property));

    if !nullable {
        if matches!(property.ty, PropertyType::String | PropertyType::Text) {
            lines.push("            if (null === $value) {".to_string());
        } else {
            lines.push("            if (null === $value || '' === $value) {".to_string());
        }
        lines.push(format!(
            "                throw new RestException('The field \"{}\" is required.');",
            property.name
        ));
        lines.push("            }".to_string());
    }

    lines.push(format!("            $entity->{}($value);", setter));
    lines.push("        }".to_string());
    lines.push(String::new());

    lines
}

/// Same coercion, but routed through the locale-aware setter.
fn render_translation_assignment(property: &PropertyModel, setter: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let nullable = property.is_nullable();

    lines.push(format!(
        "        if (\\array_key_exists('{}', $data)) {{",
        property.name
    ));
    lines.push(format!("            $value = $data['{}'];", property.name));

    if nullable {
        lines.push("            if ('' === $value) {".to_string());
        lines.push("                $value = null;".to_string());
        lines.push("            }".to_string());
    }

    lines.extend(render_value_coercion(property));

    if !nullable {
        lines.push("            if (null === $value || '' === $value) {".to_string());
        lines.push(format!(
            "                throw new RestException('The field \"{}\" is required.');",
            property.name
        ));
        lines.push("            }".to_string());
    }

    lines.push(format!(
        "            $entity->{}($value, $effectiveLocale);",
        setter
    ));
    lines.push("        }".to_string());
    lines.push(String::new());

    lines
}

fn render_value_coercion(property: &PropertyModel) -> Vec<String> {
    let mut lines = Vec::new();

    match property.ty {
        PropertyType::Int => {
            lines.push("            if (null !== $value) {".to_string());
            lines.push("                $value = (int) $value;".to_string());
            lines.push("            }".to_string());
        }
        PropertyType::Float => {
            lines.push("            if (null !== $value) {".to_string());
            lines.push("                $value = (float) $value;".to_string());
            lines.push("            }".to_string());
        }
        PropertyType::Bool => {
            lines.push("            if (null !== $value && !is_bool($value)) {".to_string());
            lines.push(
                "                $filtered = filter_var($value, FILTER_VALIDATE_BOOL, FILTER_NULL_ON_FAILURE);"
                    .to_string(),
            );
            lines.push("                if (null === $filtered) {".to_string());
            lines.push(format!(
                "                    throw new RestException('The field \"{}\" must be boolean.');",
                property.name
            ));
            lines.push("                }".to_string());
            lines.push("                $value = $filtered;".to_string());
            lines.push("            }".to_string());
        }
        PropertyType::Datetime | PropertyType::Date => {
            lines.push("            if (null !== $value) {".to_string());
            lines.push("                try {".to_string());
            lines.push(
                "                    $value = new \\DateTimeImmutable((string) $value);".to_string(),
            );
            lines.push("                } catch (\\Throwable $e) {".to_string());
            lines.push(format!(
                "                    throw new RestException('The field \"{}\" must be a valid date string.');",
                property.name
            ));
            lines.push("                }".to_string());
            lines.push("            }".to_string());
        }
        _ => {
            lines.push("            if (null !== $value) {".to_string());
            lines.push("                $value = (string) $value;".to_string());
            lines.push("            }".to_string());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use suluforge_core::{GeneratorError, TranslationConfig};

    fn blog_post() -> EntityConfig {
        let mut config = EntityConfig::new("BlogPost");
        config.properties = vec![
            PropertyModel::scalar("title", PropertyType::String),
            PropertyModel::scalar("publishedAt", PropertyType::Datetime)
                .with_option("nullable", true),
        ];
        config
    }

    #[test]
    fn render_controller___fails_when_disabled() {
        let mut config = blog_post();
        config.generate_controller = false;

        assert!(matches!(
            render_controller(&config),
            Err(GeneratorError::ControllerDisabled)
        ));
    }

    #[test]
    fn render_controller___derives_route_base_and_name_prefix() {
        let code = render_controller(&blog_post()).unwrap();

        assert!(code.contains("#[Route(path: '/admin/api/blog-posts')]"));
        assert!(code.contains(
            "#[Route(path: '', name: 'sulu_admin.blog-posts_list', defaults: ['_format' => 'json'], methods: ['GET'])]"
        ));
        assert!(code.contains("name: 'sulu_admin.blog-posts_delete'"));
    }

    #[test]
    fn render_controller___honors_explicit_route_overrides() {
        let mut config = blog_post();
        config.route_base = Some("/admin/api/posts".to_string());
        config.route_name_prefix = Some("app.posts.".to_string());

        let code = render_controller(&config).unwrap();

        assert!(code.contains("#[Route(path: '/admin/api/posts')]"));
        assert!(code.contains("name: 'app.posts_list'"));
    }

    #[test]
    fn render_controller___create_asserts_required_fields() {
        let code = render_controller(&blog_post()).unwrap();

        assert!(code.contains("$this->assertRequiredFields($data, ['title']);"));
        assert!(code.contains("if ($isCreate) {"));
    }

    #[test]
    fn render_controller___coerces_datetime_input() {
        let code = render_controller(&blog_post()).unwrap();

        assert!(code.contains("$value = new \\DateTimeImmutable((string) $value);"));
        assert!(code.contains(
            "throw new RestException('The field \"publishedAt\" must be a valid date string.');"
        ));
        assert!(code.contains("use \\DateTimeImmutable;"));
    }

    #[test]
    fn render_controller___to_one_relations_resolve_references() {
        let mut config = blog_post();
        config.properties.push(
            PropertyModel::scalar("category", PropertyType::Relation)
                .with_option("relationType", "many-to-one")
                .with_option("target", "App\\Entity\\Category"),
        );

        let code = render_controller(&config).unwrap();

        assert!(code.contains(
            "$reference = $this->entityManager->getReference(Category::class, $value);"
        ));
        assert!(code.contains("throw new RestException('The field \"category\" cannot be null.');"));
        assert!(code.contains("$this->assertRequiredFields($data, ['title', 'category']);"));
    }

    #[test]
    fn render_controller___to_many_relations_clear_then_add() {
        let mut config = blog_post();
        config.properties.push(
            PropertyModel::scalar("tags", PropertyType::Relation)
                .with_option("relationType", "many-to-many")
                .with_option("target", "App\\Entity\\Tag"),
        );

        let code = render_controller(&config).unwrap();

        assert!(code.contains("foreach ($entity->getTags()->toArray() as $existing) {"));
        assert!(code.contains("$entity->removeTag($existing);"));
        assert!(code.contains("$entity->addTag($reference);"));
        assert!(code.contains(
            "'tags' => array_map(static fn ($item) => $item->getId(), $entity->getTags()->toArray()),"
        ));
    }

    #[test]
    fn render_controller___translations_route_through_effective_locale() {
        let mut config = EntityConfig::new("Accommodation");
        config.translation = Some(TranslationConfig::new(
            "AccommodationTranslation",
            vec![PropertyModel::scalar("name", PropertyType::String)],
        ));

        let code = render_controller(&config).unwrap();

        assert!(code.contains("$effectiveLocale = $locale ?? $entity->getDefaultLocale();"));
        assert!(code.contains("$entity->setName($value, $effectiveLocale);"));
        assert!(code.contains("$payload['name'] = $entity->getName($effectiveLocale);"));
        assert!(code.contains("$payload['locale'] = $effectiveLocale;"));
        assert!(code.contains("$entity->setDefaultLocale($locale);"));
        assert!(code.contains("$listBuilder->setParameter('locale', $locale);"));
    }

    #[test]
    fn render_controller___locale_resolution_falls_back_to_en() {
        let code = render_controller(&blog_post()).unwrap();

        let query = code.find("$request->query->get('locale')").unwrap();
        let body = code.find("$request->request->get('locale')").unwrap();
        let attribute = code.find("$request->attributes->get('locale')").unwrap();
        let fallback = code.find("return $fallback ?? 'en';").unwrap();
        assert!(query < body && body < attribute && attribute < fallback);
    }
}
