//! The `make` command: build an [`EntityConfig`] from command-line options
//! and hand it to the emitter.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use suluforge_core::config::{EntityConfig, IdentifierStrategy, TranslationConfig};
use suluforge_core::error::GeneratorError;
use suluforge_core::naming::to_studly_case;
use suluforge_core::property::PropertyModel;

use crate::emit;
use crate::spec::parse_property_specs;

const DEFAULT_LOCALE_LENGTH: u32 = TranslationConfig::DEFAULT_LOCALE_LENGTH;

#[derive(Debug, Args)]
pub struct MakeOptions {
    /// Entity class name, e.g. BlogPost
    #[arg(long)]
    pub entity: String,

    /// Root namespace of the host project
    #[arg(long, default_value = "App")]
    pub namespace: String,

    /// Identifier strategy: auto, uuid or ulid
    #[arg(long)]
    pub identifier: Option<String>,

    /// Property specification, repeatable: name:type[:option=value|flag]
    #[arg(long = "property", value_name = "SPEC")]
    pub properties: Vec<String>,

    /// Skip the admin API controller
    #[arg(long)]
    pub no_controller: bool,

    /// Controller route base, defaults to /admin/api/<resource-key>
    #[arg(long)]
    pub route_base: Option<String>,

    /// Controller route name prefix, defaults to sulu_admin.<resource-key>
    #[arg(long)]
    pub route_prefix: Option<String>,

    /// Generate a per-locale translation entity
    #[arg(long)]
    pub translation: bool,

    /// Translation class name, short or fully qualified
    #[arg(long)]
    pub translation_class: Option<String>,

    /// Width of the translation locale column
    #[arg(long, value_name = "LENGTH")]
    pub translation_locale_length: Option<u32>,

    /// Translation property specification, repeatable (scalar types only)
    #[arg(long = "translation-property", value_name = "SPEC")]
    pub translation_properties: Vec<String>,

    /// Generate the admin surface (the default; wins over --no-admin)
    #[arg(long)]
    pub admin: bool,

    /// Skip the admin surface (form/list XML, admin class, config patches)
    #[arg(long)]
    pub no_admin: bool,

    /// Host project directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,
}

pub fn run(options: &MakeOptions) -> Result<()> {
    let config = build_config(options)?;
    emit::generate(&options.project_dir, &config)
        .with_context(|| format!("failed to generate entity {}", config.entity_name))
}

/// Turn the raw command-line options into a validated [`EntityConfig`].
pub fn build_config(options: &MakeOptions) -> Result<EntityConfig> {
    let entity_name = to_studly_case(options.entity.trim());
    if entity_name.is_empty() {
        bail!("entity name must not be empty");
    }

    let properties = parse_property_specs(&options.properties)?;

    let mut config = EntityConfig::new(entity_name);
    config.base_namespace = options.namespace.trim_end_matches('\\').to_string();
    config.identifier_strategy =
        IdentifierStrategy::parse_or_default(options.identifier.as_deref())?;
    config.generate_admin = options.admin || !options.no_admin;
    config.generate_controller = !options.no_controller;
    if config.generate_admin && !config.generate_controller {
        println!("controller generation enabled because the admin UI requires REST routes");
        config.generate_controller = true;
    }
    config.route_base = options.route_base.clone();
    config.route_name_prefix = options.route_prefix.clone();
    config.translation = resolve_translation(options, &config, &properties)?;
    config.properties = properties;

    Ok(config)
}

/// Translation generation is enabled by the `--translation` flag or by
/// supplying any translation option.
fn resolve_translation(
    options: &MakeOptions,
    config: &EntityConfig,
    base_properties: &[PropertyModel],
) -> Result<Option<TranslationConfig>> {
    let enabled = options.translation
        || options.translation_class.is_some()
        || !options.translation_properties.is_empty();
    if !enabled {
        return Ok(None);
    }

    let default_class = format!("{}Translation", config.entity_name);
    let class_input = options
        .translation_class
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(&default_class);

    let (class_name, is_fully_qualified) = if class_input.contains('\\') {
        let normalized = class_input.trim_start_matches('\\');
        let entity_namespace = format!("{}\\Entity\\", config.base_namespace);
        if !normalized.starts_with(&entity_namespace) {
            bail!(
                "translation classes must live in the {}\\Entity namespace",
                config.base_namespace
            );
        }
        (normalized.to_string(), true)
    } else {
        (to_studly_case(class_input), false)
    };

    let properties = parse_property_specs(&options.translation_properties)?;
    for property in &properties {
        if property.is_relation() {
            return Err(GeneratorError::TranslationPropertyNotScalar(
                property.name.clone(),
            )
            .into());
        }
        if base_properties.iter().any(|base| base.name == property.name) {
            bail!(
                "property name \"{}\" already used in entity/translation",
                property.name
            );
        }
    }

    let mut translation = TranslationConfig::new(class_name, properties);
    translation.is_fully_qualified = is_fully_qualified;
    translation.locale_length = options
        .translation_locale_length
        .map_or(DEFAULT_LOCALE_LENGTH, |length| length.max(2));

    Ok(Some(translation))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use suluforge_core::property::PropertyType;

    fn options(entity: &str) -> MakeOptions {
        MakeOptions {
            entity: entity.to_string(),
            namespace: "App".to_string(),
            identifier: None,
            properties: Vec::new(),
            no_controller: false,
            route_base: None,
            route_prefix: None,
            translation: false,
            translation_class: None,
            translation_locale_length: None,
            translation_properties: Vec::new(),
            admin: false,
            no_admin: false,
            project_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn build_config___normalizes_entity_name() {
        let config = build_config(&options("blog post")).unwrap();
        assert_eq!(config.entity_name, "BlogPost");
    }

    #[test]
    fn build_config___rejects_empty_entity_name() {
        assert!(build_config(&options("  ")).is_err());
    }

    #[test]
    fn build_config___parses_properties_and_flags() {
        let mut opts = options("BlogPost");
        opts.properties = vec!["title:string:length=160".to_string()];
        opts.identifier = Some("ulid".to_string());
        opts.no_controller = true;
        opts.no_admin = true;

        let config = build_config(&opts).unwrap();
        assert_eq!(config.identifier_strategy, IdentifierStrategy::Ulid);
        assert!(!config.generate_controller);
        assert!(!config.generate_admin);
        assert_eq!(config.properties.len(), 1);
        assert_eq!(config.properties[0].ty, PropertyType::String);
    }

    #[test]
    fn build_config___admin_forces_controller_generation() {
        let mut opts = options("BlogPost");
        opts.no_controller = true;

        let config = build_config(&opts).unwrap();
        assert!(config.generate_admin);
        assert!(config.generate_controller);
    }

    #[test]
    fn build_config___admin_flag_wins_over_no_admin() {
        let mut opts = options("BlogPost");
        opts.admin = true;
        opts.no_admin = true;

        let config = build_config(&opts).unwrap();
        assert!(config.generate_admin);
    }

    #[test]
    fn resolve_translation___class_option_enables_translation() {
        let mut opts = options("BlogPost");
        opts.translation_class = Some("PostContent".to_string());

        let config = build_config(&opts).unwrap();
        let translation = config.translation().unwrap();
        assert_eq!(translation.class_name, "PostContent");
        assert!(!translation.is_fully_qualified);
        assert_eq!(translation.locale_length, 10);
    }

    #[test]
    fn resolve_translation___defaults_class_name_from_entity() {
        let mut opts = options("BlogPost");
        opts.translation = true;

        let config = build_config(&opts).unwrap();
        assert_eq!(config.translation().unwrap().class_name, "BlogPostTranslation");
    }

    #[test]
    fn resolve_translation___fully_qualified_class_must_use_entity_namespace() {
        let mut opts = options("BlogPost");
        opts.translation_class = Some("App\\Entity\\BlogPostContent".to_string());
        let config = build_config(&opts).unwrap();
        let translation = config.translation().unwrap();
        assert!(translation.is_fully_qualified);
        assert_eq!(translation.class_name, "App\\Entity\\BlogPostContent");

        let mut opts = options("BlogPost");
        opts.translation_class = Some("Acme\\BlogPostContent".to_string());
        assert!(build_config(&opts).is_err());
    }

    #[test]
    fn resolve_translation___clamps_locale_length() {
        let mut opts = options("BlogPost");
        opts.translation = true;
        opts.translation_locale_length = Some(1);

        let config = build_config(&opts).unwrap();
        assert_eq!(config.translation().unwrap().locale_length, 2);
    }

    #[test]
    fn resolve_translation___rejects_relation_properties() {
        let mut opts = options("BlogPost");
        opts.translation_properties = vec![
            "category:relation:relationType=many-to-one:target=Category".to_string(),
        ];

        let err = build_config(&opts).unwrap_err();
        assert!(err
            .downcast_ref::<GeneratorError>()
            .is_some_and(|err| matches!(err, GeneratorError::TranslationPropertyNotScalar(_))));
    }

    #[test]
    fn resolve_translation___rejects_names_shared_with_entity() {
        let mut opts = options("BlogPost");
        opts.properties = vec!["title:string".to_string()];
        opts.translation_properties = vec!["title:string".to_string()];

        assert!(build_config(&opts).is_err());
    }
}
