//! suluforge-core - Entity configuration model and naming deriver
//!
//! This crate provides the foundational types for the suluforge generator:
//! - [`EntityConfig`] describing one entity to generate
//! - [`PropertyModel`] describing one scalar or relation property
//! - [`GeneratorError`] for configuration-precondition failures
//! - [`naming`] for case conversions and inflection

pub mod config;
pub mod error;
pub mod naming;
pub mod property;

pub use config::{EntityConfig, IdentifierStrategy, TranslationConfig};
pub use error::{GeneratorError, GeneratorResult};
pub use property::{OptionValue, PropertyModel, PropertyType, RelationKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EntityConfig, GeneratorError, GeneratorResult, IdentifierStrategy, OptionValue,
        PropertyModel, PropertyType, RelationKind, TranslationConfig,
    };
}
