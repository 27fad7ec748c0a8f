//! # Weft Codegen
//!
//! Partial-type source emission from analysed declarations.
//!
//! This crate provides:
//! - A structured emission IR and its single source formatter
//! - Section builders for constructors, contracts, proxies and companions
//! - The per-declaration synthesizer
//! - The parallel pipeline with its incremental unit cache

pub mod error;
pub mod ir;
pub mod pipeline;
pub mod render;
pub mod sections;
pub mod synthesizer;

pub use error::CodegenError;
pub use ir::{CodeUnit, InterfaceNode, Item, SectionKind, Stmt, TypeNode};
pub use pipeline::{GenerationReport, Pipeline, UnitCache};
pub use synthesizer::Synthesizer;

use weft_core::GeneratorConfig;

/// Generates compilation units from a snapshot XML string.
///
/// # Arguments
/// * `xml` - Declaration snapshot content
/// * `config` - Generator configuration
///
/// # Returns
/// The generation report, including per-declaration diagnostics.
///
/// # Errors
/// Returns `CodegenError` if the snapshot cannot be parsed or is invalid.
pub fn generate_from_xml(
    xml: &str,
    config: &GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    let snapshot = weft_schema::parse_snapshot(xml)?;
    weft_schema::validate_snapshot(&snapshot)?;
    config.validate()?;
    Ok(Pipeline::new(config.clone()).run(&snapshot))
}

/// Generates compilation units from a snapshot file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or validation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_xml() {
        let xml = r#"<snapshot>
    <declaration name="Card" namespace="App" partial="true">
        <member kind="field" name="_title" type="string">
            <annotation name="Observable"/>
        </member>
    </declaration>
</snapshot>"#;
        let report = generate_from_xml(xml, &GeneratorConfig::default()).expect("Failed to generate");
        let unit = report.unit("App.Card.g.cs").expect("Missing unit");
        assert!(unit.render().contains("public string Title"));
    }

    #[test]
    fn test_generate_from_xml_rejects_malformed_snapshot() {
        let result = generate_from_xml("<catalog/>", &GeneratorConfig::default());
        assert!(matches!(result, Err(CodegenError::Parse(_))));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("snapshot.xml");
        std::fs::write(&path, "<snapshot/>").expect("Failed to write snapshot");

        let report = generate_from_file(&path, &GeneratorConfig::default()).expect("Failed to generate");
        assert!(report.units.is_empty());
        assert!(report.diagnostics.is_empty());
    }
}
