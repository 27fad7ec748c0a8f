//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Snapshot parsing error.
    #[error("snapshot parse error: {0}")]
    Parse(#[from] weft_schema::ParseError),

    /// Snapshot validation error.
    #[error("snapshot error: {0}")]
    Schema(#[from] weft_schema::SchemaError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] weft_core::ConfigError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A model link reached synthesis without a resolved target.
    #[error("unresolved link to '{target}' in '{declaration}'")]
    Unresolved {
        /// Qualified name of the declaration.
        declaration: String,
        /// Target type name as written.
        target: String,
    },
}
