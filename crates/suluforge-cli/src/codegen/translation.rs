//! Translation entity renderer.
//!
//! The translation class carries one row per (translatable, locale) pair:
//! uuid primary key, CASCADE join back to the translatable, a locale column,
//! and the scalar properties declared translatable.

use suluforge_core::naming::{pluralize, short_class, to_snake_case};
use suluforge_core::{EntityConfig, GeneratorError, GeneratorResult};

use super::php::PhpFile;
use super::property_blocks::render_scalar_property;

pub fn render_translation(config: &EntityConfig) -> GeneratorResult<String> {
    let translation = config.translation()?;
    let fqcn = config.translation_fqcn()?;
    let class_name = config.translation_short_class()?.to_string();
    let namespace = fqcn
        .rsplit_once('\\')
        .map(|(head, _)| head.to_string())
        .unwrap_or_else(|| format!("{}\\Entity", config.base_namespace));

    let entity_fqcn = config.entity_fqcn();
    let entity_short = short_class(&entity_fqcn).to_string();
    let table_name = format!(
        "{}_translations",
        to_snake_case(&pluralize(&config.entity_name))
    );
    let unique_name = format!("uniq_{}_locale", to_snake_case(&config.entity_name));

    let mut file = PhpFile::new(namespace, format!("class {}", class_name));
    file.import("Doctrine\\ORM\\Mapping as ORM");
    file.import("Symfony\\Component\\Uid\\Uuid");
    file.import(entity_fqcn.clone());
    file.attribute("#[ORM\\Entity]");
    file.attribute(format!(
        "#[ORM\\Table(name: '{}', uniqueConstraints: [new ORM\\UniqueConstraint(name: '{}', columns: ['translatable_id', 'locale'])])]",
        table_name, unique_name
    ));

    let mut fields: Vec<String> = Vec::new();
    let mut methods: Vec<String> = Vec::new();
    let mut needs_types = false;
    let mut needs_datetime = false;

    fields.push("    #[ORM\\Id]".to_string());
    fields.push("    #[ORM\\Column(type: 'uuid', unique: true)]".to_string());
    fields.push("    private string $id;".to_string());
    fields.push(String::new());

    methods.push("    public function getId(): string".to_string());
    methods.push("    {".to_string());
    methods.push("        return $this->id;".to_string());
    methods.push("    }".to_string());
    methods.push(String::new());

    fields.push(format!(
        "    #[ORM\\ManyToOne(targetEntity: {}::class, inversedBy: 'translations')]",
        entity_short
    ));
    fields.push("    #[ORM\\JoinColumn(nullable: false, onDelete: 'CASCADE')]".to_string());
    fields.push(format!("    private {} $translatable;", entity_short));
    fields.push(String::new());

    methods.push(format!(
        "    public function getTranslatable(): {}",
        entity_short
    ));
    methods.push("    {".to_string());
    methods.push("        return $this->translatable;".to_string());
    methods.push("    }".to_string());
    methods.push(String::new());
    methods.push(format!(
        "    public function setTranslatable({} $translatable): void",
        entity_short
    ));
    methods.push("    {".to_string());
    methods.push("        $this->translatable = $translatable;".to_string());
    methods.push("    }".to_string());
    methods.push(String::new());

    fields.push(format!(
        "    #[ORM\\Column(length: {})]",
        translation.locale_length
    ));
    fields.push("    private string $locale;".to_string());
    fields.push(String::new());

    methods.push("    public function getLocale(): string".to_string());
    methods.push("    {".to_string());
    methods.push("        return $this->locale;".to_string());
    methods.push("    }".to_string());
    methods.push(String::new());
    methods.push("    public function setLocale(string $locale): void".to_string());
    methods.push("    {".to_string());
    methods.push("        $this->locale = $locale;".to_string());
    methods.push("    }".to_string());
    methods.push(String::new());

    for property in &translation.properties {
        if property.is_relation() {
            return Err(GeneratorError::TranslationPropertyNotScalar(
                property.name.clone(),
            ));
        }

        let block = render_scalar_property(property, true)?;
        file.imports(block.imports.clone());
        fields.extend(block.lines.clone());
        fields.push(String::new());
        methods.extend(block.methods.clone());
        methods.push(String::new());
        needs_types = needs_types || block.uses_types;
        needs_datetime = needs_datetime || block.uses_datetime;
    }

    if needs_types {
        file.import("Doctrine\\DBAL\\Types\\Types");
    }
    if needs_datetime {
        file.import("\\DateTimeImmutable");
    }

    file.line(format!(
        "    public function __construct({} $translatable, string $locale)",
        entity_short
    ));
    file.line("    {");
    file.line("        $this->id = Uuid::v4()->toRfc4122();");
    file.line("        $this->translatable = $translatable;");
    file.line("        $this->locale = $locale;");
    file.line("    }");
    file.blank();
    file.extend(fields);
    file.extend(methods);

    Ok(file.render())
}
