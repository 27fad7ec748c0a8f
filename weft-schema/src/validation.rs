//! Snapshot validation utilities.
//!
//! A snapshot that fails validation is rejected as a whole before any
//! generation phase looks at it.

use crate::error::SchemaError;
use crate::types::{Declaration, Snapshot};
use weft_core::naming::is_identifier;

/// Validates a parsed snapshot for structural correctness.
///
/// # Arguments
/// * `snapshot` - The snapshot to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), SchemaError> {
    use std::collections::HashSet;

    let mut seen = HashSet::new();

    for declaration in snapshot.declarations() {
        validate_declaration(declaration)?;

        let qualified = declaration.qualified_name();
        if !seen.insert(qualified.clone()) {
            return Err(SchemaError::DuplicateDeclaration { name: qualified });
        }
    }

    Ok(())
}

/// Validates names within one declaration.
fn validate_declaration(declaration: &Declaration) -> Result<(), SchemaError> {
    if !is_identifier(&declaration.name) {
        return Err(SchemaError::invalid_name("declaration", &declaration.name));
    }

    if !declaration.namespace.is_empty()
        && !declaration.namespace.split('.').all(is_identifier)
    {
        return Err(SchemaError::invalid_name("namespace", &declaration.namespace));
    }

    for member in &declaration.members {
        if !is_identifier(&member.name) {
            return Err(SchemaError::invalid_name("member", &member.name));
        }

        if member.type_name.trim().is_empty() {
            return Err(SchemaError::Validation {
                message: format!(
                    "Member '{}' of '{}' has an empty type",
                    member.name, declaration.name
                ),
            });
        }

        for parameter in &member.parameters {
            if !is_identifier(&parameter.name) {
                return Err(SchemaError::invalid_name("parameter", &parameter.name));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_snapshot;
    use crate::types::{Member, Parameter};

    #[test]
    fn test_validate_valid_snapshot() {
        let xml = r#"<snapshot>
    <declaration name="Card" namespace="App.Models" partial="true">
        <member kind="field" name="_title" type="string"/>
    </declaration>
</snapshot>"#;

        let snapshot = parse_snapshot(xml).expect("Failed to parse");
        assert!(validate_snapshot(&snapshot).is_ok());
    }

    #[test]
    fn test_validate_duplicate_declaration() {
        let xml = r#"<snapshot>
    <declaration name="Card" namespace="App"/>
    <declaration name="Card" namespace="App"/>
</snapshot>"#;

        let snapshot = parse_snapshot(xml).expect("Failed to parse");
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(SchemaError::DuplicateDeclaration { .. })
        ));
    }

    #[test]
    fn test_validate_same_name_different_namespace() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App.Views"),
            Declaration::new("Card", "App.Models"),
        ]);
        assert!(validate_snapshot(&snapshot).is_ok());
    }

    #[test]
    fn test_validate_invalid_names() {
        let snapshot = Snapshot::from_declarations(vec![Declaration::new("2Card", "App")]);
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(SchemaError::InvalidName { .. })
        ));

        let snapshot = Snapshot::from_declarations(vec![Declaration::new("Card", "App..Models")]);
        assert!(validate_snapshot(&snapshot).is_err());

        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App").with_member(Member::field("bad name", "int")),
        ]);
        assert!(validate_snapshot(&snapshot).is_err());

        let snapshot = Snapshot::from_declarations(vec![Declaration::new("Card", "App")
            .with_member(Member::method("Load", "void").with_parameter(Parameter::new("", "int")))]);
        assert!(validate_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_validate_empty_member_type() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App").with_member(Member::field("_a", " ")),
        ]);
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(SchemaError::Validation { .. })
        ));
    }
}
