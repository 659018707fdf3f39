//! Entity configuration: the immutable root description of one generation run.
//!
//! An [`EntityConfig`] is constructed once by the front end and read-only
//! afterwards. Every derived identifier (fully-qualified class names, resource
//! key, table name) is computed on demand, never stored, and the derivations
//! guarded by a feature flag fail with a typed error when the flag is off.

use crate::error::{GeneratorError, GeneratorResult};
use crate::naming;
use crate::property::PropertyModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the generated entity obtains its primary identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierStrategy {
    /// Database-generated integer id.
    Auto,
    /// RFC 4122 v4 UUID assigned in the constructor.
    Uuid,
    /// ULID assigned in the constructor.
    Ulid,
}

impl IdentifierStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierStrategy::Auto => "auto",
            IdentifierStrategy::Uuid => "uuid",
            IdentifierStrategy::Ulid => "ulid",
        }
    }

    /// Parse an optional keyword, falling back to the default on empty input.
    pub fn parse_or_default(value: Option<&str>) -> GeneratorResult<Self> {
        match value {
            None => Ok(Self::default()),
            Some(raw) if raw.trim().is_empty() => Ok(Self::default()),
            Some(raw) => raw.parse(),
        }
    }
}

impl Default for IdentifierStrategy {
    fn default() -> Self {
        IdentifierStrategy::Uuid
    }
}

impl fmt::Display for IdentifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierStrategy {
    type Err = GeneratorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(IdentifierStrategy::Auto),
            "uuid" => Ok(IdentifierStrategy::Uuid),
            "ulid" => Ok(IdentifierStrategy::Ulid),
            _ => Err(GeneratorError::UnsupportedIdentifierStrategy(value.to_string())),
        }
    }
}

/// Configuration of the per-locale translation sub-entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translation class name, short or fully qualified.
    pub class_name: String,
    /// Scalar columns that vary by locale, in rendering order.
    pub properties: Vec<PropertyModel>,
    /// Width of the `locale` column.
    pub locale_length: u32,
    /// Whether `class_name` is already a fully-qualified class name.
    pub is_fully_qualified: bool,
}

impl TranslationConfig {
    pub const DEFAULT_LOCALE_LENGTH: u32 = 10;

    pub fn new(class_name: impl Into<String>, properties: Vec<PropertyModel>) -> Self {
        Self {
            class_name: class_name.into(),
            properties,
            locale_length: Self::DEFAULT_LOCALE_LENGTH,
            is_fully_qualified: false,
        }
    }

    /// The class name without any namespace prefix.
    pub fn short_class_name(&self) -> &str {
        if self.is_fully_qualified {
            naming::short_class(&self.class_name)
        } else {
            &self.class_name
        }
    }
}

/// Immutable root description of one entity to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// PascalCase entity class name, e.g. `Accommodation`.
    pub entity_name: String,
    /// Root namespace of the host project, `App` by convention.
    pub base_namespace: String,
    pub identifier_strategy: IdentifierStrategy,
    /// Properties in rendering order; names are unique (validated upstream).
    pub properties: Vec<PropertyModel>,
    pub generate_controller: bool,
    pub generate_admin: bool,
    /// Controller route base, defaulted per resource key when absent.
    pub route_base: Option<String>,
    /// Controller route name prefix, defaulted per resource key when absent.
    pub route_name_prefix: Option<String>,
    pub translation: Option<TranslationConfig>,
}

impl EntityConfig {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            base_namespace: "App".to_string(),
            identifier_strategy: IdentifierStrategy::default(),
            properties: Vec::new(),
            generate_controller: true,
            generate_admin: true,
            route_base: None,
            route_name_prefix: None,
            translation: None,
        }
    }

    pub fn entity_fqcn(&self) -> String {
        format!("{}\\Entity\\{}", self.base_namespace, self.entity_name)
    }

    pub fn repository_fqcn(&self) -> String {
        format!("{}\\Repository\\{}Repository", self.base_namespace, self.entity_name)
    }

    /// Fails with [`GeneratorError::ControllerDisabled`] when the flag is off.
    pub fn controller_fqcn(&self) -> GeneratorResult<String> {
        if !self.generate_controller {
            return Err(GeneratorError::ControllerDisabled);
        }

        Ok(format!(
            "{}\\Controller\\Admin\\{}Controller",
            self.base_namespace, self.entity_name
        ))
    }

    /// Fails with [`GeneratorError::AdminDisabled`] when the flag is off.
    pub fn admin_fqcn(&self) -> GeneratorResult<String> {
        if !self.generate_admin {
            return Err(GeneratorError::AdminDisabled);
        }

        Ok(format!("{}\\Admin\\{}Admin", self.base_namespace, self.entity_name))
    }

    /// Fails with [`GeneratorError::TranslationNotConfigured`] when absent.
    pub fn translation_fqcn(&self) -> GeneratorResult<String> {
        let translation = self.translation()?;

        if translation.is_fully_qualified {
            return Ok(translation.class_name.trim_start_matches('\\').to_string());
        }

        Ok(format!(
            "{}\\Entity\\{}",
            self.base_namespace, translation.class_name
        ))
    }

    /// Fails with [`GeneratorError::TranslationNotConfigured`] when absent.
    pub fn translation_short_class(&self) -> GeneratorResult<&str> {
        Ok(self.translation()?.short_class_name())
    }

    pub fn translation(&self) -> GeneratorResult<&TranslationConfig> {
        self.translation
            .as_ref()
            .ok_or(GeneratorError::TranslationNotConfigured)
    }

    pub fn has_translations(&self) -> bool {
        self.translation.is_some()
    }

    /// Stable kebab-case plural key binding the entity to admin lists, forms
    /// and catalog entries.
    pub fn resource_key(&self) -> String {
        naming::to_kebab_case(&naming::pluralize(&self.entity_name))
    }

    /// Controller route base, defaulted to `/admin/api/<resource-key>`.
    pub fn controller_route_base(&self) -> String {
        self.route_base
            .clone()
            .unwrap_or_else(|| format!("/admin/api/{}", self.resource_key()))
    }

    /// Controller route name prefix, defaulted to `sulu_admin.<resource-key>`.
    /// A trailing dot on an override is dropped before the action suffixes
    /// are appended.
    pub fn controller_route_name_prefix(&self) -> String {
        self.route_name_prefix
            .clone()
            .unwrap_or_else(|| format!("sulu_admin.{}", self.resource_key()))
            .trim_end_matches('.')
            .to_string()
    }

    /// Snake-case plural table name.
    pub fn table_name(&self) -> String {
        naming::to_snake_case(&naming::pluralize(&self.entity_name))
    }
}
