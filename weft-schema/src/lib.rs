//! # Weft Schema
//!
//! Declaration snapshot model and the read-only semantic query service.
//!
//! This crate provides:
//! - Type definitions for declarations, members and annotations
//! - XML snapshot parsing
//! - The `SemanticQuery` lookup interface over an immutable snapshot
//! - Snapshot validation

pub mod error;
pub mod parser;
pub mod query;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::parse_snapshot;
pub use query::{BaseRef, DeclarationId, SemanticQuery};
pub use types::{
    Accessibility, Annotation, Declaration, DeclarationKind, Member, MemberKind, Parameter,
    Snapshot,
};
pub use validation::validate_snapshot;
