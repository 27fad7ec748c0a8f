//! Classification results.
//!
//! A [`DeclarationDescriptor`] is the explicit, exhaustive answer to "what
//! should be generated for this declaration". Later phases read these flags
//! and never go back to the raw annotations.

use std::hash::{Hash, Hasher};
use weft_core::naming;
use weft_schema::{Accessibility, DeclarationId, DeclarationKind, Parameter};

/// Classification facts of one declaration. All flags are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeclarationFlags {
    /// Carries a class-level aspect annotation.
    pub is_proxy_target: bool,
    /// Has at least one observable storage member.
    pub is_observable_model: bool,
    /// Carries a theme annotation or a theme-reactive member.
    pub is_theme_aware: bool,
    /// Inherits from a toolkit visual root.
    pub is_view_bound: bool,
    /// Raises click events.
    pub is_clickable: bool,
    /// Updates periodically.
    pub is_periodic_update: bool,
    /// Carries at least one model link.
    pub has_model_mapping: bool,
    /// Exists only to bind a view to a model.
    pub is_context_config: bool,
    /// An ancestor (or the declaration itself) already provides change notification.
    pub inherits_notification: bool,
}

impl DeclarationFlags {
    /// Returns true if the change-notification contract must be emitted.
    #[must_use]
    pub const fn needs_notification_contract(&self) -> bool {
        self.is_observable_model && !self.inherits_notification
    }

    /// Returns true if generated setters raise change notifications.
    #[must_use]
    pub const fn raises_notifications(&self) -> bool {
        self.is_observable_model || self.inherits_notification
    }
}

/// Reactivity flags of one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemberFlags {
    /// Member is observable.
    pub is_observable: bool,
    /// Member reacts to pointer hover.
    pub can_hover: bool,
    /// Member is emitted as a bindable-property descriptor.
    pub can_dependency: bool,
    /// Theme values are stored per instance instead of per type.
    pub can_isolated_storage: bool,
}

/// Named theme variant attached to a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeVariantTag {
    /// Variant name extracted from the type reference; empty when malformed.
    pub variant: String,
    /// Variant type reference as written.
    pub type_ref: String,
    /// Extra constructor text, used as the variant's value expression.
    pub extra: Option<String>,
}

impl ThemeVariantTag {
    /// Creates a tag from a type reference, extracting the variant name.
    #[must_use]
    pub fn new(type_ref: impl Into<String>, extra: Option<String>) -> Self {
        let type_ref = type_ref.into();
        Self {
            variant: naming::extract_variant_name(&type_ref),
            type_ref,
            extra,
        }
    }

    /// Returns true if a variant name was extracted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.variant.is_empty()
    }
}

/// Annotated storage member of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    /// Storage name as declared.
    pub storage_name: String,
    /// Public name derived by the naming law.
    pub public_name: String,
    /// Declared type.
    pub type_name: String,
    /// Raw initializer expression text.
    pub initializer: Option<String>,
    /// Reactivity flags.
    pub flags: MemberFlags,
    /// Theme variants in declaration order.
    pub themes: Vec<ThemeVariantTag>,
}

impl MemberDescriptor {
    /// Returns the initializer as a default-value expression.
    ///
    /// The leading assignment marker and whitespace are stripped; the rest is
    /// opaque text.
    #[must_use]
    pub fn default_expression(&self) -> Option<&str> {
        let text = self.initializer.as_deref()?.trim_start();
        let text = text.strip_prefix('=').unwrap_or(text).trim_start();
        (!text.is_empty()).then_some(text)
    }

    /// Returns true if the member carries theme variants.
    #[must_use]
    pub fn is_theme_reactive(&self) -> bool {
        !self.themes.is_empty()
    }

    /// Returns true if the member expands into companion members.
    #[must_use]
    pub fn has_companions(&self) -> bool {
        self.flags.can_hover || self.is_theme_reactive()
    }
}

/// What a model link pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// View bound to its model.
    ViewModel,
    /// Model convertible to a data-shape type.
    ModelReader,
    /// View side of a context-config binding.
    ContextView,
    /// Model side of a context-config binding.
    ContextModel,
}

/// Member summary of a resolved link target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkedMember {
    /// Public name.
    pub public_name: String,
    /// Declared type.
    pub type_name: String,
    /// Member reacts to hover.
    pub can_hover: bool,
    /// Member carries theme variants.
    pub is_theme_reactive: bool,
}

/// Resolved target of a model link.
///
/// Hashing skips `id`, so the hash is stable when declarations are inserted
/// or removed elsewhere in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Identity of the target in the snapshot.
    pub id: DeclarationId,
    /// Simple name.
    pub name: String,
    /// Namespace.
    pub namespace: String,
    /// Members of the target in declaration order.
    pub members: Vec<LinkedMember>,
}

impl Hash for LinkTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let Self {
            id: _,
            name,
            namespace,
            members,
        } = self;
        name.hash(state);
        namespace.hash(state);
        members.hash(state);
    }
}

impl LinkTarget {
    /// Returns the fully qualified name of the target.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        naming::qualified_name(&self.namespace, &self.name)
    }
}

/// Link from a declaration to another declaration, resolved by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelLink {
    /// What the link pairs.
    pub kind: LinkKind,
    /// Target type name as written.
    pub target: String,
    /// Optional namespace validation string.
    pub namespace: Option<String>,
    /// Resolved target; `None` until resolution.
    pub resolved: Option<LinkTarget>,
}

impl ModelLink {
    /// Creates an unresolved link.
    #[must_use]
    pub fn new(kind: LinkKind, target: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            namespace,
            resolved: None,
        }
    }

    /// Returns true once the link is resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Annotated "run on construction" method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructorHook {
    /// Method name.
    pub method: String,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
}

impl ConstructorHook {
    /// Returns the parameter-type signature used to group hooks into overloads.
    #[must_use]
    pub fn signature(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect()
    }
}

/// Kind of a declared member exposed through the interception interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Property.
    Property,
    /// Method.
    Method,
}

/// Public instance member exposed through the interception interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceMember {
    /// Member name.
    pub name: String,
    /// Property type or method return type.
    pub type_name: String,
    /// Member kind.
    pub kind: SurfaceKind,
    /// Parameters (methods only).
    pub parameters: Vec<Parameter>,
}

/// Classification result for one candidate declaration.
///
/// Hashing covers the structural content only; the snapshot position in
/// `id` is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationDescriptor {
    /// Identity in the snapshot.
    pub id: DeclarationId,
    /// Simple name.
    pub name: String,
    /// Containing namespace.
    pub namespace: String,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Declaration kind.
    pub kind: DeclarationKind,
    /// Base types walked, nearest first.
    pub base_chain: Vec<String>,
    /// Classification flags.
    pub flags: DeclarationFlags,
    /// Annotated members in declaration order.
    pub members: Vec<MemberDescriptor>,
    /// Model links in annotation order.
    pub links: Vec<ModelLink>,
    /// Construction hooks in declaration order.
    pub constructor_hooks: Vec<ConstructorHook>,
    /// Methods invoked on each periodic update.
    pub tick_methods: Vec<String>,
    /// Periodic update interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Declared public members exposed through the interception interface.
    pub surface: Vec<SurfaceMember>,
    /// Imports in scope at the declaration site.
    pub usings: Vec<String>,
    /// Public names whose companions the paired model generates instead.
    pub delegated: Vec<String>,
}

impl Hash for DeclarationDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let Self {
            id: _,
            name,
            namespace,
            accessibility,
            kind,
            base_chain,
            flags,
            members,
            links,
            constructor_hooks,
            tick_methods,
            tick_interval_ms,
            surface,
            usings,
            delegated,
        } = self;
        name.hash(state);
        namespace.hash(state);
        accessibility.hash(state);
        kind.hash(state);
        base_chain.hash(state);
        flags.hash(state);
        members.hash(state);
        links.hash(state);
        constructor_hooks.hash(state);
        tick_methods.hash(state);
        tick_interval_ms.hash(state);
        surface.hash(state);
        usings.hash(state);
        delegated.hash(state);
    }
}

impl DeclarationDescriptor {
    /// Returns the qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        naming::qualified_name(&self.namespace, &self.name)
    }

    /// Returns the first link of the given kind.
    #[must_use]
    pub fn link(&self, kind: LinkKind) -> Option<&ModelLink> {
        self.links.iter().find(|l| l.kind == kind)
    }

    /// Returns true if the member's companions are generated by the paired model.
    #[must_use]
    pub fn is_delegated(&self, public_name: &str) -> bool {
        self.delegated.iter().any(|d| d == public_name)
    }

    /// Members whose hover/theme companions this declaration generates itself.
    pub fn companion_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members
            .iter()
            .filter(|m| m.has_companions() && !self.is_delegated(&m.public_name))
    }

    /// Returns true if this declaration has anything to generate.
    #[must_use]
    pub fn has_generation_reason(&self) -> bool {
        let flags = self.flags;
        !self.members.is_empty()
            || flags.is_proxy_target
            || flags.is_observable_model
            || flags.is_theme_aware
            || flags.is_clickable
            || flags.is_periodic_update
            || flags.has_model_mapping
            || flags.is_context_config
            || !self.constructor_hooks.is_empty()
    }
}
