//! Error types for the suluforge generator

use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for generator operations
///
/// Every variant except [`GeneratorError::Io`] is a configuration-precondition
/// violation: it is raised at the point of derivation and terminates the run.
/// Unparsable translation catalogs are not represented here; the catalog
/// patcher recovers from those locally by skipping the file.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A derivation guarded by the controller flag was requested while disabled
    #[error("controller generation disabled")]
    ControllerDisabled,

    /// A derivation guarded by the admin flag was requested while disabled
    #[error("admin generation disabled")]
    AdminDisabled,

    /// A translation derivation was requested without a translation configuration
    #[error("no translation configuration available")]
    TranslationNotConfigured,

    /// Translation sub-entities hold scalar columns only
    #[error("translation property \"{0}\" must be scalar")]
    TranslationPropertyNotScalar(String),

    /// Enum properties carry their backing class in the `enumClass` option
    #[error("enum property \"{0}\" requires an \"enumClass\" option")]
    MissingEnumClass(String),

    /// Relation properties carry their target class in the `target` option
    #[error("relation property \"{0}\" requires a \"target\" option")]
    MissingRelationTarget(String),

    /// Collection-valued relations need the inverse field name to wire accessors
    #[error("relation \"{0}\" requires a \"mappedBy\" option")]
    MissingMappedBy(String),

    /// Relation properties carry their shape in the `relationType` option
    #[error("relation property \"{0}\" requires a \"relationType\" option")]
    MissingRelationKind(String),

    /// Unknown property type keyword
    #[error("unsupported property type \"{0}\"")]
    UnsupportedPropertyType(String),

    /// Unknown relation kind keyword
    #[error("unsupported relation kind \"{0}\"")]
    UnsupportedRelationKind(String),

    /// Unknown identifier strategy keyword
    #[error("unsupported identifier strategy \"{0}\"")]
    UnsupportedIdentifierStrategy(String),

    /// A `name:type[:option]` property specification that could not be parsed
    #[error("invalid property specification \"{0}\"")]
    InvalidPropertySpec(String),

    /// Filesystem failure while emitting or patching
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
