//! Property model: one field of a generated entity.
//!
//! A [`PropertyModel`] is a name, a closed [`PropertyType`], and an option
//! bag. Only a `relation`-typed property acts on the relation options
//! (`relationType`, `target`, `mappedBy`, `inversedBy`, `owning`, `cascade`,
//! `onDelete`); scalar properties read `nullable`, `unique`, `length`,
//! `precision`, `scale`, `default` and `enumClass`.

use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of property types. Everything except [`PropertyType::Relation`]
/// is "scalar" and maps to a single database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Int,
    Bool,
    Text,
    Datetime,
    Date,
    Decimal,
    Float,
    Uuid,
    Ulid,
    Enum,
    Relation,
}

impl PropertyType {
    /// All accepted keywords, in declaration order.
    pub const ALL: [PropertyType; 12] = [
        PropertyType::String,
        PropertyType::Int,
        PropertyType::Bool,
        PropertyType::Text,
        PropertyType::Datetime,
        PropertyType::Date,
        PropertyType::Decimal,
        PropertyType::Float,
        PropertyType::Uuid,
        PropertyType::Ulid,
        PropertyType::Enum,
        PropertyType::Relation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Bool => "bool",
            PropertyType::Text => "text",
            PropertyType::Datetime => "datetime",
            PropertyType::Date => "date",
            PropertyType::Decimal => "decimal",
            PropertyType::Float => "float",
            PropertyType::Uuid => "uuid",
            PropertyType::Ulid => "ulid",
            PropertyType::Enum => "enum",
            PropertyType::Relation => "relation",
        }
    }

    pub fn is_scalar(&self) -> bool {
        *self != PropertyType::Relation
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = GeneratorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|ty| ty.as_str() == normalized)
            .copied()
            .ok_or_else(|| GeneratorError::UnsupportedPropertyType(value.to_string()))
    }
}

/// Shape of a relation property. Only meaningful when the owning
/// [`PropertyModel`] has type [`PropertyType::Relation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "one-to-one",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToMany => "many-to-many",
        }
    }

    /// True for the single-reference shapes (`many-to-one`, `one-to-one`).
    pub fn is_to_one(&self) -> bool {
        matches!(self, RelationKind::ManyToOne | RelationKind::OneToOne)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = GeneratorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "one-to-one" => Ok(RelationKind::OneToOne),
            "many-to-one" => Ok(RelationKind::ManyToOne),
            "one-to-many" => Ok(RelationKind::OneToMany),
            "many-to-many" => Ok(RelationKind::ManyToMany),
            _ => Err(GeneratorError::UnsupportedRelationKind(value.to_string())),
        }
    }
}

/// A normalized option value: raw `key=value` strings from the front end are
/// coerced to booleans and numbers before they reach the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// One property of an entity, immutable once constructed.
///
/// `name` is already normalized to camelCase by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

impl PropertyModel {
    pub fn new(
        name: impl Into<String>,
        ty: PropertyType,
        options: BTreeMap<String, OptionValue>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            options,
        }
    }

    /// Convenience constructor for a property without options.
    pub fn scalar(name: impl Into<String>, ty: PropertyType) -> Self {
        Self::new(name, ty, BTreeMap::new())
    }

    /// Builder-style option insertion, used heavily by tests.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn is_relation(&self) -> bool {
        self.ty == PropertyType::Relation
    }

    pub fn is_nullable(&self) -> bool {
        self.bool_option("nullable", false)
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn bool_option(&self, name: &str, default: bool) -> bool {
        self.option(name).and_then(OptionValue::as_bool).unwrap_or(default)
    }

    pub fn int_option(&self, name: &str) -> Option<i64> {
        self.option(name).and_then(OptionValue::as_int)
    }

    pub fn str_option(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(OptionValue::as_str)
    }

    /// A comma-separated string option as a trimmed list, empties dropped.
    pub fn string_list_option(&self, name: &str) -> Vec<String> {
        match self.str_option(name) {
            None => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// The relation shape carried in the `relationType` option.
    pub fn relation_kind(&self) -> GeneratorResult<RelationKind> {
        let raw = self
            .str_option("relationType")
            .ok_or_else(|| GeneratorError::MissingRelationKind(self.name.clone()))?;

        raw.parse()
    }

    /// The relation target class carried in the `target` option.
    pub fn relation_target(&self) -> GeneratorResult<&str> {
        self.str_option("target")
            .filter(|target| !target.trim().is_empty())
            .ok_or_else(|| GeneratorError::MissingRelationTarget(self.name.clone()))
    }
}

#[cfg(test)]
#[path = "property/property_tests.rs"]
mod property_tests;
