//! Seeds admin translation catalogs with labels for a generated entity.
//!
//! Every `translations/admin.*.json` file gets a section under the
//! resource key with a navigation label, a details-tab label, and one
//! field label per scalar property. Existing values are never overwritten,
//! so hand-tuned translations survive re-runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use suluforge_core::config::EntityConfig;
use suluforge_core::naming::{humanize, pluralize};
use tracing::warn;

/// Patch every admin catalog under `project_dir`, returning the paths that
/// were rewritten.
pub fn patch_catalogs(project_dir: &Path, config: &EntityConfig) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/translations/admin.*.json", project_dir.display());
    let paths = glob::glob(&pattern)
        .with_context(|| format!("invalid catalog glob pattern {pattern}"))?;

    let resource_key = config.resource_key();
    let entity_label = humanize(&pluralize(&config.entity_name));
    let field_names = translatable_property_names(config);

    let mut updated = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(error) => {
                warn!(%error, "skipping unreadable catalog path");
                continue;
            }
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable catalog");
                continue;
            }
        };

        let mut data: Map<String, Value> = match serde_json::from_str(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(path = %path.display(), "skipping catalog with non-object root");
                continue;
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unparsable catalog");
                continue;
            }
        };

        merge_resource_section(&mut data, &resource_key, &entity_label, &field_names);

        let encoded = encode_catalog(&data)?;
        fs::write(&path, encoded)
            .with_context(|| format!("failed to write {}", path.display()))?;
        updated.push(path);
    }

    Ok(updated)
}

/// Fill in the resource section of a parsed catalog. Only absent keys are
/// written; the `field` map is re-sorted by key afterwards.
pub fn merge_resource_section(
    data: &mut Map<String, Value>,
    resource_key: &str,
    entity_label: &str,
    field_names: &[String],
) {
    let entry = data
        .entry(resource_key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    let Some(section) = entry.as_object_mut() else {
        return;
    };

    section
        .entry("main_navigation".to_string())
        .or_insert_with(|| Value::String(entity_label.to_string()));
    section
        .entry("tab_details".to_string())
        .or_insert_with(|| Value::String("Details".to_string()));

    let mut fields: BTreeMap<String, Value> = match section.get("field") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        _ => BTreeMap::new(),
    };
    for name in field_names {
        fields
            .entry(name.clone())
            .or_insert_with(|| Value::String(humanize(name)));
    }
    if !fields.is_empty() {
        section.insert("field".to_string(), Value::Object(fields.into_iter().collect()));
    }
}

/// Distinct scalar property names across the entity and its translation.
fn translatable_property_names(config: &EntityConfig) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    let scalar_names = config
        .properties
        .iter()
        .chain(
            config
                .translation
                .iter()
                .flat_map(|translation| translation.properties.iter()),
        )
        .filter(|property| !property.is_relation())
        .map(|property| property.name.clone());

    for name in scalar_names {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

/// Pretty-print with four-space indent and a single trailing newline,
/// keeping non-ASCII characters literal.
fn encode_catalog(data: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)
        .context("failed to encode translation catalog")?;
    buffer.push(b'\n');
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use suluforge_core::property::{PropertyModel, PropertyType};

    fn parse(json: &str) -> Map<String, Value> {
        match serde_json::from_str(json).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object root, got {other:?}"),
        }
    }

    #[test]
    fn merge_resource_section___fills_absent_labels() {
        let mut data = parse("{}");
        merge_resource_section(
            &mut data,
            "blog-posts",
            "Blog Posts",
            &["title".to_string(), "publishedAt".to_string()],
        );

        let section = data["blog-posts"].as_object().unwrap();
        assert_eq!(section["main_navigation"], "Blog Posts");
        assert_eq!(section["tab_details"], "Details");
        let fields = section["field"].as_object().unwrap();
        assert_eq!(fields["title"], "Title");
        assert_eq!(fields["publishedAt"], "Published At");
    }

    #[test]
    fn merge_resource_section___never_overwrites_existing_values() {
        let mut data = parse(
            r#"{"blog-posts": {"main_navigation": "Blog", "field": {"title": "Headline"}}}"#,
        );
        merge_resource_section(&mut data, "blog-posts", "Blog Posts", &["title".to_string()]);

        let section = data["blog-posts"].as_object().unwrap();
        assert_eq!(section["main_navigation"], "Blog");
        assert_eq!(section["field"]["title"], "Headline");
    }

    #[test]
    fn merge_resource_section___sorts_field_keys() {
        let mut data = parse(r#"{"blog-posts": {"field": {"zulu": "Zulu"}}}"#);
        merge_resource_section(
            &mut data,
            "blog-posts",
            "Blog Posts",
            &["title".to_string(), "alpha".to_string()],
        );

        let fields = data["blog-posts"]["field"].as_object().unwrap();
        let keys: Vec<&String> = fields.keys().collect();
        assert_eq!(keys, ["alpha", "title", "zulu"]);
    }

    #[test]
    fn merge_resource_section___leaves_other_sections_untouched() {
        let mut data = parse(r#"{"pages": {"main_navigation": "Pages"}}"#);
        merge_resource_section(&mut data, "blog-posts", "Blog Posts", &[]);

        assert_eq!(data["pages"]["main_navigation"], "Pages");
        let keys: Vec<&String> = data.keys().collect();
        assert_eq!(keys, ["pages", "blog-posts"]);
    }

    #[test]
    fn encode_catalog___four_space_indent_and_trailing_newline() {
        let data = parse(r#"{"blog-posts": {"tab_details": "Details"}}"#);
        let encoded = String::from_utf8(encode_catalog(&data).unwrap()).unwrap();
        assert!(encoded.contains("    \"blog-posts\": {"));
        assert!(encoded.contains("        \"tab_details\": \"Details\""));
        assert!(encoded.ends_with("}\n"));
    }

    #[test]
    fn patch_catalogs___updates_every_locale_file() {
        let dir = tempfile::tempdir().unwrap();
        let translations = dir.path().join("translations");
        std::fs::create_dir_all(&translations).unwrap();
        std::fs::write(translations.join("admin.en.json"), "{}").unwrap();
        std::fs::write(translations.join("admin.de.json"), "{}").unwrap();

        let mut config = EntityConfig::new("BlogPost");
        config.properties = vec![PropertyModel::scalar("title", PropertyType::String)];

        let updated = patch_catalogs(dir.path(), &config).unwrap();
        assert_eq!(updated.len(), 2);

        let contents =
            std::fs::read_to_string(translations.join("admin.en.json")).unwrap();
        assert!(contents.contains("\"main_navigation\": \"Blog Posts\""));
        assert!(contents.contains("\"title\": \"Title\""));
    }

    #[test]
    fn patch_catalogs___skips_unparsable_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let translations = dir.path().join("translations");
        std::fs::create_dir_all(&translations).unwrap();
        std::fs::write(translations.join("admin.en.json"), "not json").unwrap();

        let config = EntityConfig::new("BlogPost");
        let updated = patch_catalogs(dir.path(), &config).unwrap();
        assert!(updated.is_empty());
        assert_eq!(
            std::fs::read_to_string(translations.join("admin.en.json")).unwrap(),
            "not json"
        );
    }
}
