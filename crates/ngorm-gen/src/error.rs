//! Generator error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a generation run. Nothing is written when one occurs.
#[derive(Debug, Error)]
pub enum GenError {
    /// Bad configuration or unusable input paths.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Declaration file is not valid Rust.
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A declaration embeds more than one graph marker.
    #[error("{entity} ({location}) embeds both Tag and Edge markers")]
    AmbiguousKind { entity: String, location: String },

    /// A declaration embeds the same marker twice.
    #[error("{entity} ({location}) embeds more than one {marker} marker")]
    DuplicateMarker {
        entity: String,
        marker: &'static str,
        location: String,
    },

    /// Vertex and edge models cannot carry generic parameters.
    #[error("{entity} ({location}) is a graph model and must not be generic")]
    GenericEntity { entity: String, location: String },

    /// Name derivation produced an empty label.
    #[error("{declared} derives an empty external name")]
    EmptyExternalName { declared: String },

    /// Index names share one namespace per graph space.
    #[error("index {name} is declared by both {first} and {second}")]
    DuplicateIndex {
        name: String,
        first: String,
        second: String,
    },

    /// A composite index lists a column the tag does not have.
    #[error("index {index} on {entity} names unknown property {column:?}")]
    UnknownIndexColumn {
        entity: String,
        index: String,
        column: String,
    },

    /// A label or property name nGQL cannot parse unquoted.
    #[error("{declared} uses external name {name:?}, expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidExternalName { declared: String, name: String },

    /// Two entities of the same kind fold to the same label.
    #[error("{kind} label {name:?} is used by both {first} and {second}")]
    DuplicateExternalName {
        kind: &'static str,
        name: String,
        first: String,
        second: String,
    },

    /// Two fields of one entity fold to the same property name.
    #[error("{entity}: property {name:?} is declared by both {first} and {second}")]
    DuplicateField {
        entity: String,
        name: String,
        first: String,
        second: String,
    },

    /// A declared property collides with an identity pseudo-column.
    #[error("{entity}: property name {field:?} is reserved for the {kind} identity")]
    ReservedField {
        entity: String,
        field: String,
        kind: &'static str,
    },

    /// Malformed `#[ngorm(...)]` attribute.
    #[error("{entity}: invalid ngorm attribute: {message}")]
    Attribute { entity: String, message: String },

    /// The field's type has no nGQL mapping.
    #[error("{entity}.{field}: unsupported field type {ty}")]
    UnsupportedType {
        entity: String,
        field: String,
        ty: String,
    },

    /// The configured runtime path is not a Rust path.
    #[error("invalid runtime path {0:?}")]
    RuntimePath(String),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the generator.
pub type Result<T> = std::result::Result<T, GenError>;
