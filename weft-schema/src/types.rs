//! Snapshot type definitions.
//!
//! This module contains the data structures mirroring what the host compiler
//! exposes about user-written declarations: declarations, their members,
//! annotations and method parameters.

use std::collections::HashMap;
use weft_core::annotations;
use weft_core::naming::qualified_name;

/// Immutable snapshot of every declaration in a program.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Declarations in source order.
    declarations: Vec<Declaration>,
    /// Simple name to declaration indices, in source order.
    name_map: HashMap<String, Vec<usize>>,
}

impl Snapshot {
    /// Creates a new empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from declarations in source order.
    #[must_use]
    pub fn from_declarations(declarations: Vec<Declaration>) -> Self {
        let mut snapshot = Self::new();
        for declaration in declarations {
            snapshot.add_declaration(declaration);
        }
        snapshot
    }

    /// Adds a declaration to the snapshot.
    pub fn add_declaration(&mut self, declaration: Declaration) {
        let index = self.declarations.len();
        self.name_map
            .entry(declaration.name.clone())
            .or_default()
            .push(index);
        self.declarations.push(declaration);
    }

    /// Returns all declarations in source order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Returns the declaration at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Declaration> {
        self.declarations.get(index)
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if the snapshot holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Finds the first declaration matching `name`, in source order.
    ///
    /// `name` may be simple or qualified. When `namespace` is given the
    /// declaration's namespace must equal it exactly.
    #[must_use]
    pub fn find(&self, name: &str, namespace: Option<&str>) -> Option<usize> {
        let (simple, qualifier) = match name.rsplit_once('.') {
            Some((qualifier, simple)) => (simple, Some(qualifier)),
            None => (name, None),
        };
        self.name_map.get(simple)?.iter().copied().find(|&idx| {
            let decl = &self.declarations[idx];
            qualifier.is_none_or(|q| decl.namespace == q)
                && namespace.is_none_or(|ns| decl.namespace == ns)
        })
    }
}

/// Declared accessibility of a declaration or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible within the assembly.
    Internal,
    /// Visible to derived types.
    Protected,
    /// Visible to the declaring type only.
    Private,
    /// Visible to derived types or within the assembly.
    ProtectedInternal,
    /// Visible to derived types within the assembly.
    PrivateProtected,
}

impl Accessibility {
    /// Parses accessibility from its keyword form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "public" => Some(Self::Public),
            "internal" => Some(Self::Internal),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "protected internal" | "protectedInternal" => Some(Self::ProtectedInternal),
            "private protected" | "privateProtected" => Some(Self::PrivateProtected),
            _ => None,
        }
    }

    /// Returns the keyword form.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
        }
    }
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeclarationKind {
    /// Reference type.
    #[default]
    Class,
    /// Record type.
    Record,
    /// Value type.
    Struct,
    /// Interface.
    Interface,
}

impl DeclarationKind {
    /// Parses a declaration kind from its keyword form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "record" => Some(Self::Record),
            "struct" => Some(Self::Struct),
            "interface" => Some(Self::Interface),
            _ => None,
        }
    }

    /// Returns the keyword form.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Record => "record",
            Self::Struct => "struct",
            Self::Interface => "interface",
        }
    }
}

/// Declarative metadata attached to a declaration or member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// Annotation name as written.
    pub name: String,
    /// Named arguments in source order.
    pub arguments: Vec<(String, String)>,
}

impl Annotation {
    /// Creates an annotation without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Adds a named argument.
    #[must_use]
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((key.into(), value.into()));
        self
    }

    /// Returns the value of the named argument.
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if this annotation is the known annotation `known`.
    #[must_use]
    pub fn is(&self, known: &str) -> bool {
        annotations::matches(&self.name, known)
    }
}

/// Kind of a declaration member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Storage field.
    Field,
    /// Property.
    Property,
    /// Method.
    Method,
}

impl MemberKind {
    /// Parses a member kind.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "field" => Some(Self::Field),
            "property" => Some(Self::Property),
            "method" => Some(Self::Method),
            _ => None,
        }
    }
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub type_name: String,
}

impl Parameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Member of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    /// Member name.
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
    /// Declared type (return type for methods).
    pub type_name: String,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Whether the member is static.
    pub is_static: bool,
    /// Raw initializer expression text, as written.
    pub initializer: Option<String>,
    /// Annotations in source order.
    pub annotations: Vec<Annotation>,
    /// Parameters (methods only).
    pub parameters: Vec<Parameter>,
}

impl Member {
    /// Creates a member.
    #[must_use]
    pub fn new(kind: MemberKind, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            accessibility: Accessibility::Private,
            is_static: false,
            initializer: None,
            annotations: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Creates a private field.
    #[must_use]
    pub fn field(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(MemberKind::Field, name, type_name)
    }

    /// Creates a public property.
    #[must_use]
    pub fn property(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(MemberKind::Property, name, type_name).with_accessibility(Accessibility::Public)
    }

    /// Creates a private method.
    #[must_use]
    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self::new(MemberKind::Method, name, return_type)
    }

    /// Sets the accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Sets the initializer text.
    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    /// Adds an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Marks the member static.
    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Returns true if the member carries the known annotation `known`.
    #[must_use]
    pub fn has_annotation(&self, known: &str) -> bool {
        self.annotations.iter().any(|a| a.is(known))
    }

    /// Returns every occurrence of the known annotation `known`.
    pub fn annotations_named<'a>(&'a self, known: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.is(known))
    }
}

/// User-authored type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Simple name.
    pub name: String,
    /// Containing namespace (empty for the global namespace).
    pub namespace: String,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Declaration kind.
    pub kind: DeclarationKind,
    /// Whether the declaration is open for extension (`partial`).
    pub is_partial: bool,
    /// Direct base type, as written.
    pub base_type: Option<String>,
    /// Implemented interfaces, as written.
    pub interfaces: Vec<String>,
    /// Imports in scope at the declaration site.
    pub usings: Vec<String>,
    /// Declaration-level annotations in source order.
    pub annotations: Vec<Annotation>,
    /// Members in source order.
    pub members: Vec<Member>,
}

impl Declaration {
    /// Creates a public partial class.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            accessibility: Accessibility::Public,
            kind: DeclarationKind::Class,
            is_partial: true,
            base_type: None,
            interfaces: Vec::new(),
            usings: Vec::new(),
            annotations: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }

    /// Sets the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: DeclarationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets whether the declaration is partial.
    #[must_use]
    pub fn with_partial(mut self, is_partial: bool) -> Self {
        self.is_partial = is_partial;
        self
    }

    /// Sets the accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Sets the base type.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds an import.
    #[must_use]
    pub fn with_using(mut self, namespace: impl Into<String>) -> Self {
        self.usings.push(namespace.into());
        self
    }

    /// Adds a declaration-level annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Returns true if the declaration carries the known annotation `known`.
    #[must_use]
    pub fn has_annotation(&self, known: &str) -> bool {
        self.annotations.iter().any(|a| a.is(known))
    }

    /// Returns every occurrence of the known annotation `known`.
    pub fn annotations_named<'a>(&'a self, known: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.is(known))
    }

    /// Returns true if the declaration lists `interface` among its interfaces.
    #[must_use]
    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| i == interface || i.rsplit('.').next() == Some(interface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_find_by_simple_name() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App.Models"),
            Declaration::new("Card", "App.Views"),
        ]);

        assert_eq!(snapshot.find("Card", None), Some(0));
        assert_eq!(snapshot.find("Card", Some("App.Views")), Some(1));
        assert_eq!(snapshot.find("Card", Some("App.Other")), None);
        assert_eq!(snapshot.find("Missing", None), None);
    }

    #[test]
    fn test_snapshot_find_by_qualified_name() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App.Models"),
            Declaration::new("Card", "App.Views"),
        ]);

        assert_eq!(snapshot.find("App.Views.Card", None), Some(1));
        assert_eq!(snapshot.find("Other.Card", None), None);
    }

    #[test]
    fn test_snapshot_len() {
        let mut snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        snapshot.add_declaration(Declaration::new("A", ""));
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get(0).is_some());
        assert!(snapshot.get(1).is_none());
    }

    #[test]
    fn test_accessibility_parse() {
        assert_eq!(Accessibility::parse("public"), Some(Accessibility::Public));
        assert_eq!(
            Accessibility::parse("protected internal"),
            Some(Accessibility::ProtectedInternal)
        );
        assert_eq!(Accessibility::parse("friend"), None);
        assert_eq!(Accessibility::PrivateProtected.keyword(), "private protected");
    }

    #[test]
    fn test_declaration_kind_parse() {
        assert_eq!(DeclarationKind::parse("record"), Some(DeclarationKind::Record));
        assert_eq!(DeclarationKind::parse("enum"), None);
        assert_eq!(DeclarationKind::Struct.keyword(), "struct");
    }

    #[test]
    fn test_annotation_arguments() {
        let annotation = Annotation::new("ThemeValueAttribute")
            .with_argument("variant", "App.Themes.Dark")
            .with_argument("args", "\"#000\"");

        assert!(annotation.is(annotations::THEME_VALUE));
        assert_eq!(annotation.argument("variant"), Some("App.Themes.Dark"));
        assert_eq!(annotation.argument("missing"), None);
    }

    #[test]
    fn test_declaration_helpers() {
        let decl = Declaration::new("Card", "App")
            .with_interface("System.ComponentModel.INotifyPropertyChanged")
            .with_annotation(Annotation::new("Theme"))
            .with_member(Member::field("_title", "string").with_annotation(Annotation::new("Observable")));

        assert_eq!(decl.qualified_name(), "App.Card");
        assert!(decl.implements("INotifyPropertyChanged"));
        assert!(decl.has_annotation(annotations::THEME));
        assert!(!decl.has_annotation(annotations::ASPECT));
        assert!(decl.members[0].has_annotation(annotations::OBSERVABLE));
    }
}
