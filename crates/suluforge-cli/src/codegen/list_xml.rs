//! List descriptor renderer (`config/lists/<resource-key>.xml`).

use suluforge_core::naming::to_camel_case;
use suluforge_core::{EntityConfig, GeneratorResult, PropertyModel, PropertyType};

/// Whether a list column is searchable: textual, numeric and identifier
/// types are, booleans and temporal types are not.
fn is_searchable(property: &PropertyModel) -> bool {
    matches!(
        property.ty,
        PropertyType::String
            | PropertyType::Text
            | PropertyType::Uuid
            | PropertyType::Ulid
            | PropertyType::Enum
            | PropertyType::Int
            | PropertyType::Float
            | PropertyType::Decimal
    )
}

fn render_list_property(
    name: &str,
    translation: &str,
    field_name: &str,
    entity_name: &str,
    visibility: Option<&str>,
    searchable: bool,
    join_ref: Option<&str>,
) -> String {
    let mut attributes = vec![
        format!("name=\"{}\"", name),
        format!("translation=\"{}\"", translation),
    ];
    if let Some(visibility) = visibility {
        attributes.push(format!("visibility=\"{}\"", visibility));
    }
    if searchable {
        attributes.push("searchability=\"yes\"".to_string());
    }

    let mut lines = vec![
        format!("        <property {}>", attributes.join(" ")),
        format!("            <field-name>{}</field-name>", field_name),
        format!("            <entity-name>{}</entity-name>", entity_name),
    ];
    if let Some(join_ref) = join_ref {
        lines.push(format!("            <joins ref=\"{}\"/>", join_ref));
    }
    lines.push("        </property>".to_string());

    lines.join("\n")
}

/// Columns: the `id` first (no visibility attribute, never searchable), then
/// entity scalars, then translation scalars. Exactly the first non-id column
/// gets `visibility="always"`; every later one gets `visibility="yes"`.
pub fn render_list_xml(config: &EntityConfig) -> GeneratorResult<String> {
    let resource_key = config.resource_key();
    let entity_fqcn = config.entity_fqcn();
    let translation_alias = format!("{}Translation", to_camel_case(&config.entity_name));

    let mut blocks: Vec<String> = Vec::new();
    blocks.push(render_list_property(
        "id",
        "sulu_admin.uuid",
        "id",
        &entity_fqcn,
        None,
        false,
        None,
    ));

    let mut translation_properties: Vec<&PropertyModel> = Vec::new();
    if config.has_translations() {
        for property in &config.translation()?.properties {
            if property.is_relation()
                || translation_properties
                    .iter()
                    .any(|seen| seen.name == property.name)
            {
                continue;
            }
            translation_properties.push(property);
        }
    }

    let mut scalar_properties: Vec<&PropertyModel> = Vec::new();
    for property in &config.properties {
        if property.is_relation()
            || translation_properties
                .iter()
                .any(|seen| seen.name == property.name)
            || scalar_properties.iter().any(|seen| seen.name == property.name)
        {
            continue;
        }
        scalar_properties.push(property);
    }

    let mut has_primary_column = false;
    for property in &scalar_properties {
        let visibility = if has_primary_column { "yes" } else { "always" };
        has_primary_column = true;
        blocks.push(render_list_property(
            &property.name,
            &format!("{}.{}", resource_key, property.name),
            &property.name,
            &entity_fqcn,
            Some(visibility),
            is_searchable(property),
            None,
        ));
    }

    for property in &translation_properties {
        let visibility = if has_primary_column { "yes" } else { "always" };
        has_primary_column = true;
        blocks.push(render_list_property(
            &property.name,
            &format!("{}.{}", resource_key, property.name),
            &property.name,
            &translation_alias,
            Some(visibility),
            is_searchable(property),
            Some(&translation_alias),
        ));
    }

    let mut lines = vec![
        "<?xml version=\"1.0\" ?>".to_string(),
        "<list xmlns=\"http://schemas.sulu.io/list-builder/list\"".to_string(),
        "      xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"".to_string(),
        "      xsi:schemaLocation=\"http://schemas.sulu.io/list-builder/list http://schemas.sulu.io/list-builder/list-1.0.xsd\">".to_string(),
        format!("    <key>{}</key>", resource_key),
    ];

    if !translation_properties.is_empty() {
        lines.push(String::new());
        lines.push(format!("    <joins name=\"{}\">", translation_alias));
        lines.push("        <join>".to_string());
        lines.push(format!("            <entity-name>{}</entity-name>", translation_alias));
        lines.push(format!(
            "            <field-name>{}.translations</field-name>",
            entity_fqcn
        ));
        lines.push("            <method>LEFT</method>".to_string());
        lines.push(format!(
            "            <condition>{}.locale = :locale</condition>",
            translation_alias
        ));
        lines.push("        </join>".to_string());
        lines.push("    </joins>".to_string());
    }

    lines.push(String::new());
    lines.push("    <properties>".to_string());
    lines.push(blocks.join("\n\n"));
    lines.push("    </properties>".to_string());
    lines.push("</list>".to_string());

    Ok(format!("{}\n", lines.join("\n")))
}
