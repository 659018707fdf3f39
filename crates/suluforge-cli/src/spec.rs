//! Parsing of `--property` specifications.
//!
//! A specification is a colon-separated string: `name:type` followed by any
//! number of `key=value` pairs or bare flags, e.g.
//! `title:string:length=160:unique` or
//! `category:relation:relationType=many-to-one:target=Category:nullable=false`.

use std::collections::BTreeMap;

use suluforge_core::error::{GeneratorError, GeneratorResult};
use suluforge_core::naming::to_camel_case;
use suluforge_core::property::{OptionValue, PropertyModel, PropertyType};

// ============================================================================
// Property specifications
// ============================================================================

/// Parse a single property specification into a [`PropertyModel`].
///
/// Names are normalized to camelCase, option values are coerced to
/// booleans and numbers where they look like them, and relation
/// specifications are validated to carry both `relationType` and `target`.
pub fn parse_property_spec(specification: &str) -> GeneratorResult<PropertyModel> {
    let parts: Vec<&str> = specification
        .split(':')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() < 2 {
        return Err(GeneratorError::InvalidPropertySpec(specification.to_string()));
    }

    let name = normalize_property_name(parts[0]);
    let ty: PropertyType = parts[1].parse()?;

    let mut options = BTreeMap::new();
    for part in &parts[2..] {
        match part.split_once('=') {
            Some((key, value)) => {
                options.insert(key.trim().to_string(), normalize_option_value(value.trim()));
            }
            None => {
                options.insert((*part).to_string(), OptionValue::Bool(true));
            }
        }
    }

    let property = PropertyModel::new(name, ty, options);
    if property.is_relation() {
        // Both must be present and well-formed before the renderers run.
        property.relation_kind()?;
        property.relation_target()?;
    }

    Ok(property)
}

/// Parse a batch of specifications, rejecting duplicate property names.
pub fn parse_property_specs(specifications: &[String]) -> GeneratorResult<Vec<PropertyModel>> {
    let mut properties: Vec<PropertyModel> = Vec::with_capacity(specifications.len());
    for specification in specifications {
        let property = parse_property_spec(specification)?;
        if properties.iter().any(|existing| existing.name == property.name) {
            return Err(GeneratorError::InvalidPropertySpec(format!(
                "duplicate property \"{}\"",
                property.name
            )));
        }
        properties.push(property);
    }

    Ok(properties)
}

/// Normalize an arbitrary user-supplied name to camelCase: runs of
/// non-alphanumeric characters become word breaks.
pub fn normalize_property_name(input: &str) -> String {
    let mut spaced = String::with_capacity(input.len());
    let mut last_was_break = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            spaced.push(ch);
            last_was_break = false;
        } else if !last_was_break {
            spaced.push(' ');
            last_was_break = true;
        }
    }

    to_camel_case(spaced.trim())
}

/// Coerce a raw option value: `true`/`false` become booleans, numeric
/// strings become integers or floats, everything else stays a string.
fn normalize_option_value(value: &str) -> OptionValue {
    match value.to_ascii_lowercase().as_str() {
        "true" => return OptionValue::Bool(true),
        "false" => return OptionValue::Bool(false),
        _ => {}
    }

    if !value.contains('.') {
        if let Ok(number) = value.parse::<i64>() {
            return OptionValue::Int(number);
        }
    } else if let Ok(number) = value.parse::<f64>() {
        return OptionValue::Float(number);
    }

    OptionValue::String(value.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use suluforge_core::property::RelationKind;

    #[test]
    fn parse_property_spec___name_and_type_only() {
        let property = parse_property_spec("title:string").unwrap();
        assert_eq!(property.name, "title");
        assert_eq!(property.ty, PropertyType::String);
        assert!(property.options.is_empty());
    }

    #[test]
    fn parse_property_spec___normalizes_name_to_camel_case() {
        let property = parse_property_spec("published at:datetime").unwrap();
        assert_eq!(property.name, "publishedAt");

        let property = parse_property_spec("seo-description:text").unwrap();
        assert_eq!(property.name, "seoDescription");
    }

    #[test]
    fn parse_property_spec___coerces_option_values() {
        let property =
            parse_property_spec("title:string:length=160:nullable=false:unique").unwrap();
        assert_eq!(property.int_option("length"), Some(160));
        assert!(!property.is_nullable());
        assert!(property.bool_option("unique", false));
    }

    #[test]
    fn parse_property_spec___float_option_value() {
        let property = parse_property_spec("weight:float:default=1.5").unwrap();
        assert_eq!(
            property.option("default"),
            Some(&OptionValue::Float(1.5))
        );
    }

    #[test]
    fn parse_property_spec___relation_requires_kind_and_target() {
        let err = parse_property_spec("category:relation:target=Category").unwrap_err();
        assert!(matches!(err, GeneratorError::MissingRelationKind(_)));

        let err =
            parse_property_spec("category:relation:relationType=many-to-one").unwrap_err();
        assert!(matches!(err, GeneratorError::MissingRelationTarget(_)));
    }

    #[test]
    fn parse_property_spec___relation_with_kind_and_target() {
        let property = parse_property_spec(
            "category:relation:relationType=many-to-one:target=Category:nullable=false",
        )
        .unwrap();
        assert_eq!(property.relation_kind().unwrap(), RelationKind::ManyToOne);
        assert_eq!(property.relation_target().unwrap(), "Category");
    }

    #[test]
    fn parse_property_spec___rejects_bare_name() {
        let err = parse_property_spec("title").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPropertySpec(_)));
    }

    #[test]
    fn parse_property_spec___rejects_unknown_type() {
        let err = parse_property_spec("title:blob").unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedPropertyType(_)));
    }

    #[test]
    fn parse_property_specs___rejects_duplicates() {
        let specs = vec!["title:string".to_string(), "Title!:string".to_string()];
        let err = parse_property_specs(&specs).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPropertySpec(_)));
    }

    #[test]
    fn normalize_property_name___collapses_separators() {
        assert_eq!(normalize_property_name("  first__name "), "firstName");
        assert_eq!(normalize_property_name("Title"), "title");
        assert_eq!(normalize_property_name("number-of-rooms"), "numberOfRooms");
    }
}
