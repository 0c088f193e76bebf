//! Error types for catalogue access.

use oxide_ddl::ParseError;

use crate::catalog::ObjectType;

/// Errors that can occur while reading schema objects from a database.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Database error while querying the catalogue.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The stored DDL could not be parsed.
    #[error("Failed to parse DDL: {0}")]
    Parse(#[from] ParseError),

    /// No object of that type and name exists in the schema.
    #[error("{object_type} '{name}' not found in schema '{schema}'")]
    ObjectNotFound {
        /// Schema that was searched.
        schema: String,
        /// Object name as requested.
        name: String,
        /// Object type as requested.
        object_type: ObjectType,
    },

    /// The object exists but has no stored DDL, like an automatic index.
    #[error("{object_type} '{name}' has no CREATE statement")]
    NoDefinition {
        /// Object name.
        name: String,
        /// Object type.
        object_type: ObjectType,
    },

    /// IO error (reading DDL from a file or stdin).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
