//! Doctrine entity class renderer.

use suluforge_core::{EntityConfig, GeneratorResult, IdentifierStrategy};

use super::php::PhpFile;
use super::property_blocks::{render_relation_property, render_scalar_property, RenderedBlock};

pub fn render_entity(config: &EntityConfig) -> GeneratorResult<String> {
    let namespace = format!("{}\\Entity", config.base_namespace);
    let repository_fqcn = config.repository_fqcn();
    let repository_short = suluforge_core::naming::short_class(&repository_fqcn).to_string();

    let mut file = PhpFile::new(namespace, format!("class {}", config.entity_name));
    file.import("Doctrine\\ORM\\Mapping as ORM");
    file.import(repository_fqcn.clone());
    file.attribute(format!(
        "#[ORM\\Entity(repositoryClass: {}::class)]",
        repository_short
    ));
    file.attribute(format!("#[ORM\\Table(name: '{}')]", config.table_name()));

    let mut fields: Vec<String> = Vec::new();
    let mut methods: Vec<String> = Vec::new();
    let mut constructor_lines: Vec<String> = Vec::new();
    let mut needs_types = false;
    let mut needs_datetime = false;
    let mut needs_collections = false;

    let identifier = render_identifier(config.identifier_strategy);
    file.imports(identifier.imports.clone());
    fields.extend(identifier.lines.clone());
    fields.push(String::new());
    methods.extend(identifier.methods.clone());
    methods.push(String::new());
    if let Some(line) = &identifier.constructor {
        constructor_lines.push(line.clone());
    }

    for property in &config.properties {
        let block = if property.is_relation() {
            render_relation_property(property)?
        } else {
            render_scalar_property(property, false)?
        };

        file.imports(block.imports.clone());
        fields.extend(block.lines.clone());
        fields.push(String::new());
        methods.extend(block.methods.clone());
        methods.push(String::new());
        if let Some(line) = &block.constructor {
            constructor_lines.push(line.clone());
        }
        needs_types = needs_types || block.uses_types;
        needs_datetime = needs_datetime || block.uses_datetime;
        needs_collections = needs_collections || block.requires_collection;
    }

    if config.has_translations() {
        let translation = config.translation()?;
        let translation_short = config.translation_short_class()?.to_string();
        file.import(config.translation_fqcn()?);
        needs_collections = true;

        fields.push(format!("    #[ORM\\Column(length: {})]", translation.locale_length));
        fields.push("    private string $defaultLocale = 'en';".to_string());
        fields.push(String::new());
        fields.push(format!(
            "    #[ORM\\OneToMany(mappedBy: 'translatable', targetEntity: {}::class, cascade: ['persist', 'remove'], orphanRemoval: true, indexBy: 'locale')]",
            translation_short
        ));
        fields.push("    private Collection $translations;".to_string());
        fields.push(String::new());

        constructor_lines.push("$this->translations = new ArrayCollection();".to_string());
        methods.extend(render_delegating_accessors(config, &translation_short)?);
        methods.push(String::new());
    }

    if needs_collections {
        file.import("Doctrine\\Common\\Collections\\ArrayCollection");
        file.import("Doctrine\\Common\\Collections\\Collection");
    }
    if needs_types {
        file.import("Doctrine\\DBAL\\Types\\Types");
    }
    if needs_datetime {
        file.import("\\DateTimeImmutable");
    }

    file.line(format!(
        "    public const RESOURCE_KEY = '{}';",
        config.resource_key()
    ));
    file.blank();
    file.extend(fields);

    if !constructor_lines.is_empty() {
        file.line("    public function __construct()");
        file.line("    {");
        for line in &constructor_lines {
            file.line(format!("        {}", line));
        }
        file.line("    }");
        file.blank();
    }

    file.extend(methods);

    Ok(file.render())
}

fn render_identifier(strategy: IdentifierStrategy) -> RenderedBlock {
    let mut block = RenderedBlock {
        imports: vec!["Doctrine\\ORM\\Mapping as ORM".to_string()],
        ..RenderedBlock::default()
    };

    block.lines.push("    #[ORM\\Id]".to_string());

    match strategy {
        IdentifierStrategy::Auto => {
            block.lines.push("    #[ORM\\GeneratedValue]".to_string());
            block.lines.push("    #[ORM\\Column(type: 'integer')]".to_string());
            block.lines.push("    private ?int $id = null;".to_string());
            block.methods.push("    public function getId(): ?int".to_string());
        }
        IdentifierStrategy::Uuid => {
            block.imports.push("Symfony\\Component\\Uid\\Uuid".to_string());
            block
                .lines
                .push("    #[ORM\\Column(type: 'uuid', unique: true)]".to_string());
            block.lines.push("    private string $id;".to_string());
            block.constructor = Some("$this->id = Uuid::v4()->toRfc4122();".to_string());
            block.methods.push("    public function getId(): string".to_string());
        }
        IdentifierStrategy::Ulid => {
            block.imports.push("Symfony\\Component\\Uid\\Ulid".to_string());
            block
                .lines
                .push("    #[ORM\\Column(type: 'ulid', unique: true)]".to_string());
            block.lines.push("    private string $id;".to_string());
            block.constructor = Some("$this->id = (string) (new Ulid());".to_string());
            block.methods.push("    public function getId(): string".to_string());
        }
    }

    block.methods.push("    {".to_string());
    block.methods.push("        return $this->id;".to_string());
    block.methods.push("    }".to_string());

    block
}

/// The locale machinery on the translatable side: defaultLocale accessors,
/// the get-or-create `translate()` lookup, and one delegating getter/setter
/// pair per translated property.
fn render_delegating_accessors(
    config: &EntityConfig,
    translation_short: &str,
) -> GeneratorResult<Vec<String>> {
    use suluforge_core::naming::to_studly_case;

    use super::property_blocks::php_base_type;

    let translation = config.translation()?;
    let mut lines: Vec<String> = Vec::new();

    lines.push("    public function getDefaultLocale(): string".to_string());
    lines.push("    {".to_string());
    lines.push("        return $this->defaultLocale;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push("    public function setDefaultLocale(string $defaultLocale): self".to_string());
    lines.push("    {".to_string());
    lines.push("        $this->defaultLocale = $defaultLocale;".to_string());
    lines.push(String::new());
    lines.push("        return $this;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push("    /**".to_string());
    lines.push(format!(
        "     * @return Collection<string, {}>",
        translation_short
    ));
    lines.push("     */".to_string());
    lines.push("    public function getTranslations(): Collection".to_string());
    lines.push("    {".to_string());
    lines.push("        return $this->translations;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push(format!(
        "    public function translate(?string $locale = null): {}",
        translation_short
    ));
    lines.push("    {".to_string());
    lines.push("        $localeKey = $this->resolveLocale($locale);".to_string());
    lines.push("        if ($this->translations->containsKey($localeKey)) {".to_string());
    lines.push(format!("            /** @var {} $translation */", translation_short));
    lines.push("            $translation = $this->translations->get($localeKey);".to_string());
    lines.push("            return $translation;".to_string());
    lines.push("        }".to_string());
    lines.push(String::new());
    lines.push(format!(
        "        $translation = new {}($this, $localeKey);",
        translation_short
    ));
    lines.push("        $this->translations->set($localeKey, $translation);".to_string());
    lines.push(String::new());
    lines.push("        return $translation;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());

    lines.push("    private function resolveLocale(?string $locale): string".to_string());
    lines.push("    {".to_string());
    lines.push("        $localeKey = $locale ?? $this->defaultLocale;".to_string());
    lines.push(String::new());
    lines.push("        return '' !== $localeKey ? $localeKey : $this->defaultLocale;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());

    for property in &translation.properties {
        let suffix = to_studly_case(&property.name);
        let nullable = property.is_nullable();
        let base = php_base_type(property.ty);
        let php_type = if nullable {
            format!("?{}", base)
        } else {
            base.to_string()
        };
        let setter_type = if !nullable && base == "string" {
            format!("?{}", base)
        } else {
            php_type.clone()
        };

        lines.push(format!(
            "    public function get{}(?string $locale = null): {}",
            suffix, php_type
        ));
        lines.push("    {".to_string());
        lines.push(format!(
            "        return $this->translate($locale)->get{}();",
            suffix
        ));
        lines.push("    }".to_string());
        lines.push(String::new());
        lines.push(format!(
            "    public function set{}({} $value, ?string $locale = null): self",
            suffix, setter_type
        ));
        lines.push("    {".to_string());
        lines.push(format!(
            "        $this->translate($locale)->set{}($value);",
            suffix
        ));
        lines.push(String::new());
        lines.push("        return $this;".to_string());
        lines.push("    }".to_string());
        lines.push(String::new());
    }

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use suluforge_core::{PropertyModel, PropertyType, TranslationConfig};

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
    fn render_entity___uuid_identifier_is_assigned_in_the_constructor() {
        let code = render_entity(&blog_post()).unwrap();

        assert!(code.contains("#[ORM\\Entity(repositoryClass: BlogPostRepository::class)]"));
        assert!(code.contains("#[ORM\\Table(name: 'blog_posts')]"));
        assert!(code.contains("public const RESOURCE_KEY = 'blog-posts';"));
        assert!(code.contains("#[ORM\\Column(type: 'uuid', unique: true)]"));
        assert!(code.contains("$this->id = Uuid::v4()->toRfc4122();"));
        assert!(code.contains("public function getId(): string"));
        assert!(code.contains("use Symfony\\Component\\Uid\\Uuid;"));
    }

    #[test]
    fn render_entity___auto_identifier_needs_no_constructor() {
        let mut config = EntityConfig::new("Invoice");
        config.identifier_strategy = IdentifierStrategy::Auto;

        let code = render_entity(&config).unwrap();

        assert!(code.contains("#[ORM\\GeneratedValue]"));
        assert!(code.contains("private ?int $id = null;"));
        assert!(!code.contains("__construct"));
    }

    #[test]
    fn render_entity___scalar_defaults_follow_nullability() {
        let code = render_entity(&blog_post()).unwrap();

        assert!(code.contains("private string $title = '';"));
        assert!(code.contains("private ?\\DateTimeImmutable $publishedAt = null;"));
        assert!(code.contains("use \\DateTimeImmutable;"));
        assert!(code.contains("use Doctrine\\DBAL\\Types\\Types;"));
    }

    #[test]
    fn render_entity___translation_wiring_delegates_through_translate() {
        let mut config = EntityConfig::new("Accommodation");
        config.translation = Some(TranslationConfig::new(
            "AccommodationTranslation",
            vec![PropertyModel::scalar("name", PropertyType::String)],
        ));

        let code = render_entity(&config).unwrap();

        assert!(code.contains("private string $defaultLocale = 'en';"));
        assert!(code.contains(
            "#[ORM\\OneToMany(mappedBy: 'translatable', targetEntity: AccommodationTranslation::class, cascade: ['persist', 'remove'], orphanRemoval: true, indexBy: 'locale')]"
        ));
        assert!(code.contains("$this->translations = new ArrayCollection();"));
        assert!(code.contains(
            "public function translate(?string $locale = null): AccommodationTranslation"
        ));
        assert!(code.contains("$translation = new AccommodationTranslation($this, $localeKey);"));
        assert!(code.contains("public function getName(?string $locale = null): string"));
        assert!(code.contains("return $this->translate($locale)->getName();"));
        assert!(code
            .contains("public function setName(?string $value, ?string $locale = null): self"));
    }

    #[test]
    fn render_entity___relation_constructor_initializes_collections() {
        let mut config = EntityConfig::new("Author");
        config.properties = vec![PropertyModel::scalar("books", PropertyType::Relation)
            .with_option("relationType", "one-to-many")
            .with_option("target", "App\\Entity\\Book")
            .with_option("mappedBy", "author")];

        let code = render_entity(&config).unwrap();

        assert!(code.contains("$this->books = new ArrayCollection();"));
        assert!(code.contains("use Doctrine\\Common\\Collections\\ArrayCollection;"));
        assert!(code.contains("public function addBook(Book $entity): self"));
    }
}
