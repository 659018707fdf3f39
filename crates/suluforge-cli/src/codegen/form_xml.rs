//! Form descriptor renderer (`config/forms/<snake_entity>/details.xml`).

use suluforge_core::naming::to_snake_case;
use suluforge_core::{EntityConfig, GeneratorResult, PropertyModel, PropertyType};

/// The Sulu form field type for a scalar property.
fn map_form_type(property: &PropertyModel) -> &'static str {
    match property.ty {
        PropertyType::Text => "text_area",
        PropertyType::Bool => "checkbox",
        PropertyType::Int | PropertyType::Float | PropertyType::Decimal => "number",
        PropertyType::Datetime => "datetime",
        PropertyType::Date => "date",
        _ => "text_line",
    }
}

fn render_form_property(property: &PropertyModel, resource_key: &str) -> String {
    let mandatory = if property.is_nullable() { "false" } else { "true" };
    let title = format!("{}.field.{}", resource_key, property.name);

    format!(
        "        <property name=\"{}\" type=\"{}\" mandatory=\"{}\">\n            <meta>\n                <title>{}</title>\n            </meta>\n        </property>",
        property.name,
        map_form_type(property),
        mandatory,
        title,
    )
}

/// One `<property>` per distinct scalar: entity-owned first, then
/// translation-owned. A translation property shadows an entity property of
/// the same name, so the field renders once with translation semantics.
pub fn render_form_xml(config: &EntityConfig) -> GeneratorResult<String> {
    let form_key = format!("{}_details", to_snake_case(&config.entity_name));
    let resource_key = config.resource_key();

    let mut translation_names: Vec<&str> = Vec::new();
    if config.has_translations() {
        for property in &config.translation()?.properties {
            if !property.is_relation() {
                translation_names.push(property.name.as_str());
            }
        }
    }

    let mut blocks: Vec<String> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    for property in &config.properties {
        if property.is_relation()
            || translation_names.contains(&property.name.as_str())
            || seen.contains(&property.name.as_str())
        {
            continue;
        }

        blocks.push(render_form_property(property, &resource_key));
        seen.push(property.name.as_str());
    }

    if config.has_translations() {
        for property in &config.translation()?.properties {
            if property.is_relation() || seen.contains(&property.name.as_str()) {
                continue;
            }

            blocks.push(render_form_property(property, &resource_key));
            seen.push(property.name.as_str());
        }
    }

    let mut lines = vec![
        "<?xml version=\"1.0\" ?>".to_string(),
        "<form xmlns=\"http://schemas.sulu.io/template/template\"".to_string(),
        "      xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"".to_string(),
        "      xsi:schemaLocation=\"http://schemas.sulu.io/template/template http://schemas.sulu.io/template/form-1.0.xsd\">".to_string(),
        format!("    <key>{}</key>", form_key),
        String::new(),
        "    <properties>".to_string(),
    ];

    if !blocks.is_empty() {
        lines.push(format!("{}\n", blocks.join("\n\n")));
    }

    lines.push("    </properties>".to_string());
    lines.push("</form>".to_string());

    Ok(format!("{}\n", lines.join("\n")))
}
