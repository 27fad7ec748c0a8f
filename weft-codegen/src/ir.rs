//! Structured emission IR.
//!
//! A [`CodeUnit`] holds one node per generated artifact. Nodes are grouped by
//! [`SectionKind`] in an ordered map, so the emitted section order is fixed
//! by the enum and never by the order builders ran in.

use std::collections::BTreeMap;

/// Sections of a generated declaration, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    /// Constructor overloads.
    Constructors,
    /// Change-notification contract implementation.
    NotificationContract,
    /// Theme-lifecycle contract implementation.
    ThemeContract,
    /// Proxy property surface.
    ProxySurface,
    /// Click and periodic-update surface.
    InteractionSurface,
    /// Per-member generated properties.
    Properties,
    /// Hover/theme companion members.
    Companions,
    /// View/model accessors, model-reader and binding methods.
    ModelLink,
}

/// Statement inside a member body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// Single line, terminated by the caller.
    Line(String),
    /// Braced block introduced by `head`.
    Block {
        /// Block header (`if (...)`).
        head: String,
        /// Block body.
        body: Vec<Stmt>,
    },
}

impl Stmt {
    /// Creates a single-line statement.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    /// Creates a block statement.
    pub fn block(head: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self::Block {
            head: head.into(),
            body,
        }
    }
}

/// Method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Parameter type.
    pub type_name: String,
    /// Parameter name.
    pub name: String,
}

impl Param {
    /// Creates a parameter.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Property accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// Expression-bodied accessor (`get => expr;`).
    Expr(String),
    /// Block-bodied accessor.
    Body(Vec<Stmt>),
}

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    /// Field.
    Field {
        /// Modifiers (`private readonly`).
        modifiers: String,
        /// Field type.
        type_name: String,
        /// Field name.
        name: String,
        /// Initializer expression.
        initializer: Option<String>,
    },
    /// Property.
    Property {
        /// Modifiers.
        modifiers: String,
        /// Property type.
        type_name: String,
        /// Property name.
        name: String,
        /// Getter.
        get: Accessor,
        /// Setter, absent for read-only properties.
        set: Option<Accessor>,
    },
    /// Constructor overload.
    Constructor {
        /// Modifiers.
        modifiers: String,
        /// Parameters.
        params: Vec<Param>,
        /// Body.
        body: Vec<Stmt>,
    },
    /// Method with a body.
    Method {
        /// Modifiers.
        modifiers: String,
        /// Return type.
        return_type: String,
        /// Method name.
        name: String,
        /// Parameters.
        params: Vec<Param>,
        /// Body.
        body: Vec<Stmt>,
    },
    /// Event.
    Event {
        /// Modifiers.
        modifiers: String,
        /// Delegate type.
        type_name: String,
        /// Event name.
        name: String,
    },
    /// Bodiless partial method the user may implement.
    PartialHook {
        /// Method name.
        name: String,
        /// Parameters.
        params: Vec<Param>,
    },
}

impl Item {
    /// Returns the member name this item declares.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Field { name, .. }
            | Self::Property { name, .. }
            | Self::Method { name, .. }
            | Self::Event { name, .. }
            | Self::PartialHook { name, .. } => Some(name),
            Self::Constructor { .. } => None,
        }
    }

    /// Creates a private field.
    pub fn field(
        modifiers: impl Into<String>,
        type_name: impl Into<String>,
        name: impl Into<String>,
        initializer: Option<String>,
    ) -> Self {
        Self::Field {
            modifiers: modifiers.into(),
            type_name: type_name.into(),
            name: name.into(),
            initializer,
        }
    }

    /// Creates a method.
    pub fn method(
        modifiers: impl Into<String>,
        return_type: impl Into<String>,
        name: impl Into<String>,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Self {
        Self::Method {
            modifiers: modifiers.into(),
            return_type: return_type.into(),
            name: name.into(),
            params,
            body,
        }
    }

    /// Creates a partial hook with a single `value` parameter.
    pub fn hook(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self::PartialHook {
            name: name.into(),
            params: vec![Param::new(value_type, "value")],
        }
    }
}

/// Declaration being extended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeNode {
    /// Accessibility keyword.
    pub accessibility: String,
    /// `class` or `record`.
    pub keyword: String,
    /// Simple name.
    pub name: String,
    /// Capability list (implemented contracts).
    pub capabilities: Vec<String>,
    /// Generated items keyed by section.
    pub sections: BTreeMap<SectionKind, Vec<Item>>,
}

impl TypeNode {
    /// Creates an empty node.
    pub fn new(
        accessibility: impl Into<String>,
        keyword: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            accessibility: accessibility.into(),
            keyword: keyword.into(),
            name: name.into(),
            capabilities: Vec::new(),
            sections: BTreeMap::new(),
        }
    }

    /// Appends items to a section. Empty item lists create no section.
    pub fn extend(&mut self, section: SectionKind, items: Vec<Item>) {
        if !items.is_empty() {
            self.sections.entry(section).or_default().extend(items);
        }
    }

    /// Returns the items of a section.
    #[must_use]
    pub fn section(&self, section: SectionKind) -> &[Item] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates every item in emission order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.values().flatten()
    }
}

/// Interface emitted after the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceNode {
    /// Accessibility keyword.
    pub accessibility: String,
    /// Interface name.
    pub name: String,
    /// Complete member declarations (`void Load(int id);`).
    pub members: Vec<String>,
}

/// One emitted compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeUnit {
    /// File hint (`Namespace.Name.g.cs`).
    pub hint_name: String,
    /// Imports, de-duplicated.
    pub imports: Vec<String>,
    /// Namespace; empty for the global namespace.
    pub namespace: String,
    /// The extended declaration.
    pub declaration: TypeNode,
    /// Interfaces emitted after the declaration.
    pub trailing: Vec<InterfaceNode>,
}

impl CodeUnit {
    /// Renders the unit as source text.
    #[must_use]
    pub fn render(&self) -> String {
        crate::render::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_ignores_insertion_order() {
        let mut node = TypeNode::new("public", "class", "Card");
        node.extend(
            SectionKind::ModelLink,
            vec![Item::method("public", "void", "Bind", Vec::new(), Vec::new())],
        );
        node.extend(
            SectionKind::Constructors,
            vec![Item::Constructor {
                modifiers: "public".to_string(),
                params: Vec::new(),
                body: Vec::new(),
            }],
        );
        node.extend(SectionKind::Properties, Vec::new());

        let kinds: Vec<_> = node.sections.keys().copied().collect();
        assert_eq!(kinds, vec![SectionKind::Constructors, SectionKind::ModelLink]);
        assert!(node.section(SectionKind::Properties).is_empty());
    }

    #[test]
    fn test_item_names() {
        assert_eq!(Item::hook("OnTitleChanged", "string").name(), Some("OnTitleChanged"));
        let ctor = Item::Constructor {
            modifiers: "public".to_string(),
            params: Vec::new(),
            body: Vec::new(),
        };
        assert_eq!(ctor.name(), None);
    }
}
