//! Semantic query service.
//!
//! The generator never inspects host metadata directly; it asks these
//! synchronous, side-effect-free questions over an immutable snapshot.

use crate::types::{Annotation, Declaration, Member, Snapshot};

/// Identity of a declaration within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(pub usize);

/// Direct base type of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseRef<'a> {
    /// Base type declared in the snapshot.
    Declared(DeclarationId),
    /// Base type defined outside the snapshot (toolkit or library type).
    External(&'a str),
}

/// Read-only lookups over a program snapshot.
pub trait SemanticQuery: Sync {
    /// Returns every declaration in source order.
    fn declarations(&self) -> &[Declaration];

    /// Returns the declaration with the given identity.
    fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations().get(id.0)
    }

    /// Returns the annotations of a declaration.
    fn annotations(&self, id: DeclarationId) -> &[Annotation] {
        self.declaration(id)
            .map(|d| d.annotations.as_slice())
            .unwrap_or_default()
    }

    /// Returns the members of a declaration.
    fn members(&self, id: DeclarationId) -> &[Member] {
        self.declaration(id)
            .map(|d| d.members.as_slice())
            .unwrap_or_default()
    }

    /// Returns the direct base type of a declaration.
    fn base_type(&self, id: DeclarationId) -> Option<BaseRef<'_>>;

    /// Finds the first declaration matching `name`, optionally restricted to `namespace`.
    fn find_declaration(&self, name: &str, namespace: Option<&str>) -> Option<DeclarationId>;
}

impl SemanticQuery for Snapshot {
    fn declarations(&self) -> &[Declaration] {
        Snapshot::declarations(self)
    }

    fn base_type(&self, id: DeclarationId) -> Option<BaseRef<'_>> {
        let decl = self.get(id.0)?;
        let base = decl.base_type.as_deref()?;
        // Prefer a base in the same namespace, as the host's name lookup would.
        let found = self
            .find(base, Some(&decl.namespace))
            .or_else(|| self.find(base, None))
            .filter(|&idx| idx != id.0);
        Some(match found {
            Some(idx) => BaseRef::Declared(DeclarationId(idx)),
            None => BaseRef::External(base),
        })
    }

    fn find_declaration(&self, name: &str, namespace: Option<&str>) -> Option<DeclarationId> {
        self.find(name, namespace).map(DeclarationId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Declaration;

    fn snapshot() -> Snapshot {
        Snapshot::from_declarations(vec![
            Declaration::new("Base", "Other").with_base("Control"),
            Declaration::new("Base", "App").with_base("FrameworkElement"),
            Declaration::new("Card", "App").with_base("Base"),
            Declaration::new("Loose", "App").with_base("Unknown"),
            Declaration::new("Itself", "App").with_base("Itself"),
        ])
    }

    #[test]
    fn test_base_type_prefers_same_namespace() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.base_type(DeclarationId(2)),
            Some(BaseRef::Declared(DeclarationId(1)))
        );
    }

    #[test]
    fn test_base_type_external() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.base_type(DeclarationId(1)),
            Some(BaseRef::External("FrameworkElement"))
        );
        assert_eq!(
            snapshot.base_type(DeclarationId(3)),
            Some(BaseRef::External("Unknown"))
        );
    }

    #[test]
    fn test_base_type_never_points_to_self() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.base_type(DeclarationId(4)),
            Some(BaseRef::External("Itself"))
        );
    }

    #[test]
    fn test_find_declaration() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.find_declaration("Base", None),
            Some(DeclarationId(0))
        );
        assert_eq!(
            snapshot.find_declaration("Base", Some("App")),
            Some(DeclarationId(1))
        );
        assert_eq!(snapshot.find_declaration("Nope", None), None);
    }

    #[test]
    fn test_default_lookups() {
        let snapshot = snapshot();
        assert!(snapshot.annotations(DeclarationId(0)).is_empty());
        assert!(snapshot.members(DeclarationId(99)).is_empty());
        assert!(snapshot.declaration(DeclarationId(99)).is_none());
    }
}
