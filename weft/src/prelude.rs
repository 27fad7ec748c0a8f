//! Prelude module for convenient imports.
//!
//! ```ignore
//! use weft::prelude::*;
//! ```

// Configuration
pub use weft_core::{ConfigError, GeneratorConfig};

// Snapshot types
pub use weft_schema::{
    Annotation, Declaration, Member, ParseError, SchemaError, SemanticQuery, Snapshot,
    parse_snapshot, validate_snapshot,
};

// Analysis types
pub use weft_analysis::{
    Analysis, AnalysisError, CompanionPlan, DeclarationDescriptor, DeclarationFlags, Diagnostic,
    Severity, analyze,
};

// Generation types
pub use weft_codegen::{
    CodeUnit, CodegenError, GenerationReport, Pipeline, generate_from_file, generate_from_xml,
};
