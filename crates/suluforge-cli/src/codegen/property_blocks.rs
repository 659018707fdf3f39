//! Per-property rendering: column attribute, field declaration, accessors.
//!
//! Scalar properties map to a single Doctrine column; relation properties map
//! to the four association shapes. Each renderer returns a [`RenderedBlock`]
//! that the entity/translation assemblers merge into the class body.

use suluforge_core::naming::{short_class, singularize, to_studly_case};
use suluforge_core::{GeneratorError, GeneratorResult, PropertyModel, PropertyType, RelationKind};

use super::php::format_php_value;

/// Everything one property contributes to its class.
#[derive(Default)]
pub struct RenderedBlock {
    pub imports: Vec<String>,
    pub lines: Vec<String>,
    pub methods: Vec<String>,
    pub constructor: Option<String>,
    pub uses_types: bool,
    pub uses_datetime: bool,
    pub requires_collection: bool,
}

/// The PHP-side type a scalar property is declared with.
pub fn php_base_type(ty: PropertyType) -> &'static str {
    match ty {
        PropertyType::String
        | PropertyType::Text
        | PropertyType::Uuid
        | PropertyType::Ulid
        | PropertyType::Enum
        | PropertyType::Decimal => "string",
        PropertyType::Int => "int",
        PropertyType::Bool => "bool",
        PropertyType::Float => "float",
        PropertyType::Datetime | PropertyType::Date => "\\DateTimeImmutable",
        PropertyType::Relation => "mixed",
    }
}

/// Render a scalar property. In translation context (`for_translation`) a
/// non-nullable string setter is widened to `?string` and coalesces to `''`,
/// matching how Sulu form submissions hand over empty values.
pub fn render_scalar_property(
    property: &PropertyModel,
    for_translation: bool,
) -> GeneratorResult<RenderedBlock> {
    let mut block = RenderedBlock::default();

    let nullable = property.is_nullable();
    let unique = property.bool_option("unique", false);
    let base_type = php_base_type(property.ty);
    let php_type = if nullable {
        format!("?{}", base_type)
    } else {
        base_type.to_string()
    };
    let mut setter_type = php_type.clone();
    let mut default_assignment = String::new();
    let mut column_args: Vec<String> = Vec::new();

    match property.ty {
        PropertyType::String => {
            if !nullable {
                default_assignment = " = ''".to_string();
            }
            if let Some(length) = property.int_option("length") {
                column_args.push(format!("length: {}", length));
            }
        }
        PropertyType::Text => {
            column_args.push("type: 'text'".to_string());
            if !nullable {
                default_assignment = " = ''".to_string();
            }
        }
        PropertyType::Int => {
            column_args.push("type: 'integer'".to_string());
        }
        PropertyType::Bool => {
            column_args.push("type: 'boolean'".to_string());
            if !nullable {
                default_assignment = " = false".to_string();
            }
        }
        PropertyType::Datetime => {
            column_args.push("type: Types::DATETIME_IMMUTABLE".to_string());
            block.uses_types = true;
            block.uses_datetime = true;
        }
        PropertyType::Date => {
            column_args.push("type: Types::DATE_IMMUTABLE".to_string());
            block.uses_types = true;
            block.uses_datetime = true;
        }
        PropertyType::Decimal => {
            column_args.push("type: 'decimal'".to_string());
            column_args.push(format!(
                "precision: {}",
                property.int_option("precision").unwrap_or(10)
            ));
            column_args.push(format!("scale: {}", property.int_option("scale").unwrap_or(2)));
        }
        PropertyType::Float => {
            column_args.push("type: 'float'".to_string());
        }
        PropertyType::Uuid => {
            column_args.push("type: 'uuid'".to_string());
        }
        PropertyType::Ulid => {
            column_args.push("type: 'ulid'".to_string());
        }
        PropertyType::Enum => {
            let enum_class = property
                .str_option("enumClass")
                .filter(|class| !class.is_empty())
                .ok_or_else(|| GeneratorError::MissingEnumClass(property.name.clone()))?;
            block.imports.push(enum_class.to_string());
            column_args.push(format!("enumType: {}::class", short_class(enum_class)));
        }
        PropertyType::Relation => {
            return Err(GeneratorError::UnsupportedPropertyType(
                "relation properties have no column rendering".to_string(),
            ));
        }
    }

    if nullable {
        column_args.push("nullable: true".to_string());
    }
    if unique {
        column_args.push("unique: true".to_string());
    }

    if let Some(default) = property.option("default") {
        let formatted = format_php_value(default);
        if formatted != "''" {
            column_args.push(format!("options: [\"default\" => {}]", formatted));
            if !nullable {
                default_assignment = format!(" = {}", formatted);
            }
        }
    }

    if nullable && default_assignment.is_empty() {
        default_assignment = " = null".to_string();
    }

    if for_translation && !nullable && base_type == "string" {
        setter_type = format!("?{}", base_type);
    }

    block
        .lines
        .push(format!("    #[ORM\\Column({})]", column_args.join(", ")));
    block.lines.push(format!(
        "    private {} ${}{};",
        php_type, property.name, default_assignment
    ));

    let suffix = to_studly_case(&property.name);
    block
        .methods
        .push(format!("    public function get{}(): {}", suffix, php_type));
    block.methods.push("    {".to_string());
    block
        .methods
        .push(format!("        return $this->{};", property.name));
    block.methods.push("    }".to_string());
    block.methods.push(String::new());
    block.methods.push(format!(
        "    public function set{}({} ${}): self",
        suffix, setter_type, property.name
    ));
    block.methods.push("    {".to_string());
    if for_translation && !nullable && base_type == "string" {
        block.methods.push(format!(
            "        $this->{} = ${} ?? '';",
            property.name, property.name
        ));
    } else {
        block.methods.push(format!(
            "        $this->{} = ${};",
            property.name, property.name
        ));
    }
    block.methods.push(String::new());
    block.methods.push("        return $this;".to_string());
    block.methods.push("    }".to_string());

    Ok(block)
}

/// Render a relation property, dispatching on the declared shape.
pub fn render_relation_property(property: &PropertyModel) -> GeneratorResult<RenderedBlock> {
    match property.relation_kind()? {
        RelationKind::ManyToOne => render_to_one(property, RelationKind::ManyToOne),
        RelationKind::OneToOne => render_to_one(property, RelationKind::OneToOne),
        RelationKind::OneToMany => render_one_to_many(property),
        RelationKind::ManyToMany => render_many_to_many(property),
    }
}

fn on_delete_behavior(property: &PropertyModel, nullable: bool) -> String {
    match property.str_option("onDelete") {
        Some(behavior) => behavior.to_string(),
        None if nullable => "SET NULL".to_string(),
        None => "RESTRICT".to_string(),
    }
}

fn render_to_one(property: &PropertyModel, kind: RelationKind) -> GeneratorResult<RenderedBlock> {
    let mut block = RenderedBlock::default();
    let target = property.relation_target()?;
    let target_short = short_class(target).to_string();
    block.imports.push(target.to_string());

    let nullable = property.is_nullable();
    let on_delete = on_delete_behavior(property, nullable);

    match kind {
        RelationKind::ManyToOne => {
            block.lines.push(format!(
                "    #[ORM\\ManyToOne(targetEntity: {}::class)]",
                target_short
            ));
        }
        RelationKind::OneToOne => {
            let mut args = vec![format!("targetEntity: {}::class", target_short)];
            if let Some(mapped_by) = property.str_option("mappedBy").filter(|v| !v.is_empty()) {
                args.push(format!("mappedBy: '{}'", mapped_by));
            }
            if let Some(inversed_by) = property.str_option("inversedBy").filter(|v| !v.is_empty()) {
                args.push(format!("inversedBy: '{}'", inversed_by));
            }
            block
                .lines
                .push(format!("    #[ORM\\OneToOne({})]", args.join(", ")));
        }
        _ => unreachable!("to-one renderer called with a to-many shape"),
    }

    let mut join_args: Vec<String> = Vec::new();
    if !nullable {
        join_args.push("nullable: false".to_string());
    }
    if kind == RelationKind::OneToOne {
        join_args.push("unique: true".to_string());
    }
    if !on_delete.is_empty() {
        join_args.push(format!("onDelete: '{}'", on_delete));
    }
    block
        .lines
        .push(format!("    #[ORM\\JoinColumn({})]", join_args.join(", ")));

    let php_type = if nullable {
        format!("?{}", target_short)
    } else {
        target_short.clone()
    };
    let default_assignment = if nullable { " = null" } else { "" };
    block.lines.push(format!(
        "    private {} ${}{};",
        php_type, property.name, default_assignment
    ));

    let suffix = to_studly_case(&property.name);
    block
        .methods
        .push(format!("    public function get{}(): {}", suffix, php_type));
    block.methods.push("    {".to_string());
    block
        .methods
        .push(format!("        return $this->{};", property.name));
    block.methods.push("    }".to_string());
    block.methods.push(String::new());
    block.methods.push(format!(
        "    public function set{}({} ${}): self",
        suffix, php_type, property.name
    ));
    block.methods.push("    {".to_string());
    block.methods.push(format!(
        "        $this->{} = ${};",
        property.name, property.name
    ));
    block.methods.push(String::new());
    block.methods.push("        return $this;".to_string());
    block.methods.push("    }".to_string());

    Ok(block)
}

fn render_one_to_many(property: &PropertyModel) -> GeneratorResult<RenderedBlock> {
    let mut block = RenderedBlock::default();
    let target = property.relation_target()?;
    let target_short = short_class(target).to_string();
    block.imports.push(target.to_string());
    block
        .imports
        .push("Doctrine\\Common\\Collections\\ArrayCollection".to_string());
    block
        .imports
        .push("Doctrine\\Common\\Collections\\Collection".to_string());

    let mapped_by = property
        .str_option("mappedBy")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GeneratorError::MissingMappedBy(property.name.clone()))?
        .to_string();
    let cascade = property.string_list_option("cascade");
    let orphan_removal = property.bool_option("orphanRemoval", false);

    let mut args = vec![
        format!("mappedBy: '{}'", mapped_by),
        format!("targetEntity: {}::class", target_short),
    ];
    if !cascade.is_empty() {
        args.push(format!("cascade: ['{}']", cascade.join("', '")));
    }
    if orphan_removal {
        args.push("orphanRemoval: true".to_string());
    }

    block
        .lines
        .push(format!("    #[ORM\\OneToMany({})]", args.join(", ")));
    block
        .lines
        .push(format!("    private Collection ${};", property.name));
    block.lines.push(String::new());

    let getter_suffix = to_studly_case(&property.name);
    let singular_studly = to_studly_case(&singularize(&property.name));
    let setter_on_target = format!("set{}", to_studly_case(&mapped_by));
    let getter_on_target = format!("get{}", to_studly_case(&mapped_by));

    block.methods.push("    /**".to_string());
    block
        .methods
        .push(format!("     * @return Collection<int, {}>", target_short));
    block.methods.push("     */".to_string());
    block.methods.push(format!(
        "    public function get{}(): Collection",
        getter_suffix
    ));
    block.methods.push("    {".to_string());
    block
        .methods
        .push(format!("        return $this->{};", property.name));
    block.methods.push("    }".to_string());
    block.methods.push(String::new());

    block.methods.push(format!(
        "    public function add{}({} $entity): self",
        singular_studly, target_short
    ));
    block.methods.push("    {".to_string());
    block.methods.push(format!(
        "        if (!$this->{}->contains($entity)) {{",
        property.name
    ));
    block
        .methods
        .push(format!("            $this->{}->add($entity);", property.name));
    block
        .methods
        .push(format!("            $entity->{}($this);", setter_on_target));
    block.methods.push("        }".to_string());
    block.methods.push(String::new());
    block.methods.push("        return $this;".to_string());
    block.methods.push("    }".to_string());
    block.methods.push(String::new());

    block.methods.push(format!(
        "    public function remove{}({} $entity): self",
        singular_studly, target_short
    ));
    block.methods.push("    {".to_string());
    block.methods.push(format!(
        "        if ($this->{}->removeElement($entity) && $entity->{}() === $this) {{",
        property.name, getter_on_target
    ));
    block
        .methods
        .push(format!("            $entity->{}(null);", setter_on_target));
    block.methods.push("        }".to_string());
    block.methods.push(String::new());
    block.methods.push("        return $this;".to_string());
    block.methods.push("    }".to_string());

    block.constructor = Some(format!(
        "$this->{} = new ArrayCollection();",
        property.name
    ));
    block.requires_collection = true;

    Ok(block)
}

fn render_many_to_many(property: &PropertyModel) -> GeneratorResult<RenderedBlock> {
    let mut block = RenderedBlock::default();
    let target = property.relation_target()?;
    let target_short = short_class(target).to_string();
    block.imports.push(target.to_string());
    block
        .imports
        .push("Doctrine\\Common\\Collections\\ArrayCollection".to_string());
    block
        .imports
        .push("Doctrine\\Common\\Collections\\Collection".to_string());

    let owning = property.bool_option("owning", true);
    let mapped_by = property
        .str_option("mappedBy")
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let inversed_by = property
        .str_option("inversedBy")
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let cascade = property.string_list_option("cascade");

    let mut args = vec![format!("targetEntity: {}::class", target_short)];
    if owning {
        if let Some(inversed_by) = &inversed_by {
            args.push(format!("inversedBy: '{}'", inversed_by));
        }
    } else {
        let mapped_by = mapped_by
            .as_deref()
            .ok_or_else(|| GeneratorError::MissingMappedBy(property.name.clone()))?;
        args.push(format!("mappedBy: '{}'", mapped_by));
    }
    if !cascade.is_empty() {
        args.push(format!("cascade: ['{}']", cascade.join("', '")));
    }

    block
        .lines
        .push(format!("    #[ORM\\ManyToMany({})]", args.join(", ")));
    block
        .lines
        .push(format!("    private Collection ${};", property.name));
    block.lines.push(String::new());

    let getter_suffix = to_studly_case(&property.name);
    let singular_studly = to_studly_case(&singularize(&property.name));

    block.methods.push("    /**".to_string());
    block
        .methods
        .push(format!("     * @return Collection<int, {}>", target_short));
    block.methods.push("     */".to_string());
    block.methods.push(format!(
        "    public function get{}(): Collection",
        getter_suffix
    ));
    block.methods.push("    {".to_string());
    block
        .methods
        .push(format!("        return $this->{};", property.name));
    block.methods.push("    }".to_string());
    block.methods.push(String::new());

    block.methods.push(format!(
        "    public function add{}({} $entity): self",
        singular_studly, target_short
    ));
    block.methods.push("    {".to_string());
    block.methods.push(format!(
        "        if (!$this->{}->contains($entity)) {{",
        property.name
    ));
    block
        .methods
        .push(format!("            $this->{}->add($entity);", property.name));
    if !owning {
        if let Some(mapped_by) = &mapped_by {
            let counterpart = format!("add{}", to_studly_case(&singularize(mapped_by)));
            block
                .methods
                .push(format!("            $entity->{}($this);", counterpart));
        }
    }
    block.methods.push("        }".to_string());
    block.methods.push(String::new());
    block.methods.push("        return $this;".to_string());
    block.methods.push("    }".to_string());
    block.methods.push(String::new());

    block.methods.push(format!(
        "    public function remove{}({} $entity): self",
        singular_studly, target_short
    ));
    block.methods.push("    {".to_string());
    block.methods.push(format!(
        "        if ($this->{}->removeElement($entity)) {{",
        property.name
    ));
    if !owning {
        if let Some(mapped_by) = &mapped_by {
            let counterpart = format!("remove{}", to_studly_case(&singularize(mapped_by)));
            block
                .methods
                .push(format!("            $entity->{}($this);", counterpart));
        }
    }
    block.methods.push("        }".to_string());
    block.methods.push(String::new());
    block.methods.push("        return $this;".to_string());
    block.methods.push("    }".to_string());

    block.constructor = Some(format!(
        "$this->{} = new ArrayCollection();",
        property.name
    ));
    block.requires_collection = true;

    Ok(block)
}
