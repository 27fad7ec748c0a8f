//! Theme/hover combinatorial expander.
//!
//! One logical member becomes the product of hover states and theme
//! variants. Companion order follows the order theme tags were declared on
//! the member; generated partial hooks depend on it.

use crate::descriptor::{DeclarationDescriptor, MemberDescriptor, ThemeVariantTag};
use crate::error::AnalysisError;
use weft_core::naming;

/// Which expansion a companion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanionKind {
    /// Value applied while the pointer is over the element.
    Hovered,
    /// Value applied while the pointer is away.
    NoHovered,
    /// Plain theme-keyed value.
    Themed,
}

/// Backing storage of a companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Toolkit bindable property (view-bound declarations).
    Bindable,
    /// Private backing field.
    Field,
}

/// Scope of theme-keyed storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeScope {
    /// Keyed by declaring type and theme.
    Shared,
    /// Keyed by instance and theme.
    Isolated,
}

/// One generated companion member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Companion {
    /// Generated member name.
    pub name: String,
    /// Expansion kind.
    pub kind: CompanionKind,
    /// Theme variant, absent for hover-only pairs.
    pub variant: Option<ThemeVariantTag>,
    /// Backing storage.
    pub storage: Storage,
    /// Theme storage scope.
    pub scope: ThemeScope,
    /// Default-value expression.
    pub default_value: String,
}

impl Companion {
    /// Returns the variant name, if this companion is theme-keyed.
    #[must_use]
    pub fn variant_name(&self) -> Option<&str> {
        self.variant.as_ref().map(|t| t.variant.as_str())
    }

    /// Returns true if the setter persists into theme-keyed storage.
    #[must_use]
    pub fn persists_theme_value(&self) -> bool {
        self.variant.is_some() && self.kind != CompanionKind::Hovered
    }
}

/// Companions of one member, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanionPlan {
    /// Public name of the expanded member.
    pub member: String,
    /// Storage name of the expanded member.
    pub storage_name: String,
    /// Declared type shared by every companion.
    pub type_name: String,
    /// Member reacts to hover.
    pub can_hover: bool,
    /// Companions in emission order.
    pub companions: Vec<Companion>,
}

/// Expands one member.
///
/// # Errors
/// Returns `AnalysisError::Expansion` when a theme tag carries no usable
/// variant name. Nothing is produced for the member in that case.
pub fn expand_member(
    declaration: &DeclarationDescriptor,
    member: &MemberDescriptor,
) -> Result<CompanionPlan, AnalysisError> {
    if let Some(bad) = member.themes.iter().find(|t| !t.is_valid()) {
        return Err(AnalysisError::Expansion {
            declaration: declaration.qualified_name(),
            member: member.storage_name.clone(),
            type_ref: bad.type_ref.clone(),
        });
    }

    let storage = if declaration.flags.is_view_bound {
        Storage::Bindable
    } else {
        Storage::Field
    };
    let scope = if member.flags.can_isolated_storage {
        ThemeScope::Isolated
    } else {
        ThemeScope::Shared
    };
    let name = member.public_name.as_str();
    let member_default = member.default_expression().unwrap_or("default");

    let companion = |name: String, kind, tag: Option<&ThemeVariantTag>| Companion {
        name,
        kind,
        variant: tag.cloned(),
        storage,
        scope,
        default_value: tag
            .and_then(|t| t.extra.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(member_default)
            .to_string(),
    };

    let companions = if member.themes.is_empty() {
        if member.flags.can_hover {
            vec![
                companion(naming::hovered_name(None, name), CompanionKind::Hovered, None),
                companion(naming::no_hovered_name(None, name), CompanionKind::NoHovered, None),
            ]
        } else {
            Vec::new()
        }
    } else if member.flags.can_hover {
        member
            .themes
            .iter()
            .flat_map(|tag| {
                [
                    companion(
                        naming::hovered_name(Some(&tag.variant), name),
                        CompanionKind::Hovered,
                        Some(tag),
                    ),
                    companion(
                        naming::no_hovered_name(Some(&tag.variant), name),
                        CompanionKind::NoHovered,
                        Some(tag),
                    ),
                ]
            })
            .collect()
    } else {
        member
            .themes
            .iter()
            .map(|tag| {
                companion(
                    naming::themed_name(&tag.variant, name),
                    CompanionKind::Themed,
                    Some(tag),
                )
            })
            .collect()
    };

    Ok(CompanionPlan {
        member: member.public_name.clone(),
        storage_name: member.storage_name.clone(),
        type_name: member.type_name.clone(),
        can_hover: member.flags.can_hover,
        companions,
    })
}

/// Expands every member the declaration generates companions for.
///
/// Delegated members are skipped. A member that fails expansion is reported
/// and left out; the other plans are still returned.
#[must_use]
pub fn expand(declaration: &DeclarationDescriptor) -> (Vec<CompanionPlan>, Vec<AnalysisError>) {
    let mut plans = Vec::new();
    let mut errors = Vec::new();
    for member in declaration.companion_members() {
        match expand_member(declaration, member) {
            Ok(plan) => plans.push(plan),
            Err(error) => {
                tracing::warn!(%error, "member expansion skipped");
                errors.push(error);
            }
        }
    }
    (plans, errors)
}
