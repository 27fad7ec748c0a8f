//! # Weft
//!
//! Compile-time synthesis of observable, themed and proxied partial types.
//!
//! Weft reads an immutable snapshot of annotated declarations, classifies
//! each one along independent axes (observable model, proxy target, theme
//! awareness, hover, click, periodic update, view/model linking) and emits a
//! partial-type compilation unit per declaration.
//!
//! ## Quick Start
//!
//! ```ignore
//! use weft::prelude::*;
//!
//! let snapshot = parse_snapshot(&xml)?;
//! let report = Pipeline::new(GeneratorConfig::default()).run(&snapshot);
//! for unit in &report.units {
//!     println!("{}", unit.render());
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Naming law, annotation vocabulary, configuration
//! - [`schema`] - Declaration snapshot model and semantic queries
//! - [`analysis`] - Classification, resolution and companion expansion
//! - [`codegen`] - Emission IR, section builders and the pipeline

pub mod inspect;
pub mod prelude;

/// Naming law, annotation vocabulary and configuration.
pub mod core {
    pub use weft_core::*;
}

/// Declaration snapshot model and semantic queries.
pub mod schema {
    pub use weft_schema::*;
}

/// Classification, resolution and companion expansion.
pub mod analysis {
    pub use weft_analysis::*;
}

/// Emission IR, section builders and the pipeline.
pub mod codegen {
    pub use weft_codegen::*;
}

// Re-export commonly used items at the crate root
pub use weft_analysis::{Analysis, Diagnostic, Severity, analyze};
pub use weft_codegen::{
    CodeUnit, CodegenError, GenerationReport, Pipeline, generate_from_file, generate_from_xml,
};
pub use weft_core::GeneratorConfig;
pub use weft_schema::{Snapshot, parse_snapshot};
