//! Member descriptor builder.
//!
//! Turns annotated storage fields into [`MemberDescriptor`]s and enforces
//! public-name uniqueness within the declaration.

use crate::descriptor::{LinkedMember, MemberDescriptor, MemberFlags, ThemeVariantTag};
use crate::error::AnalysisError;
use std::collections::HashMap;
use weft_core::annotations::{self, args};
use weft_core::naming::{self, is_identifier, normalize_public_name};
use weft_core::GeneratorConfig;
use weft_schema::{Accessibility, Declaration, Member, MemberKind};

/// Annotated members of one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSet {
    /// Members in declaration order, collisions removed.
    pub members: Vec<MemberDescriptor>,
    /// One `NameCollision` per dropped member.
    pub collisions: Vec<AnalysisError>,
}

/// Returns true if `member` is an annotated storage member.
#[must_use]
pub fn is_annotated_member(member: &Member) -> bool {
    member.kind == MemberKind::Field
        && annotations::MEMBER_MARKERS
            .iter()
            .any(|marker| member.has_annotation(marker))
}

/// Builds the member descriptors of a declaration.
///
/// # Errors
/// Returns `AnalysisError::Classification` when a member's annotation data is
/// unusable (static storage, missing variant, duplicate variant, or a storage
/// name with no valid public form). Name collisions do not fail the build;
/// they are collected in [`MemberSet::collisions`].
pub fn build_members(
    declaration: &Declaration,
    config: &GeneratorConfig,
) -> Result<MemberSet, AnalysisError> {
    let qualified = declaration.qualified_name();

    // Names already owned, mapped to the member that owns them.
    let mut taken: HashMap<String, String> = declaration
        .members
        .iter()
        .filter(|m| !is_annotated_member(m))
        .map(|m| (m.name.clone(), m.name.clone()))
        .collect();

    let mut set = MemberSet::default();
    for member in declaration.members.iter().filter(|m| is_annotated_member(m)) {
        let descriptor = build_member(&qualified, member, config)?;

        let mut names = vec![descriptor.public_name.clone()];
        names.extend(companion_names(&descriptor));

        if let Some((name, owner)) = names
            .iter()
            .find_map(|n| taken.get(n).map(|owner| (n, owner)))
        {
            tracing::warn!(
                declaration = %qualified,
                member = %member.name,
                name = %name,
                "public name collision, member dropped"
            );
            set.collisions.push(AnalysisError::NameCollision {
                declaration: qualified.clone(),
                public_name: name.clone(),
                first: owner.clone(),
                second: member.name.clone(),
            });
            continue;
        }

        for name in names {
            taken.insert(name, member.name.clone());
        }
        set.members.push(descriptor);
    }

    Ok(set)
}

fn build_member(
    declaration: &str,
    member: &Member,
    config: &GeneratorConfig,
) -> Result<MemberDescriptor, AnalysisError> {
    if member.is_static {
        return Err(AnalysisError::classification(
            declaration,
            format!("annotated member '{}' must not be static", member.name),
        ));
    }

    let public_name = normalize_public_name(&member.name);
    if !is_identifier(&public_name) {
        return Err(AnalysisError::classification(
            declaration,
            format!("member '{}' has no valid public name", member.name),
        ));
    }

    let mut themes: Vec<ThemeVariantTag> = Vec::new();
    for annotation in member.annotations_named(annotations::THEME_VALUE) {
        let Some(type_ref) = annotation.argument(args::VARIANT) else {
            return Err(AnalysisError::classification(
                declaration,
                format!(
                    "theme value on '{}' is missing the '{}' argument",
                    member.name,
                    args::VARIANT
                ),
            ));
        };
        let tag = ThemeVariantTag::new(type_ref, annotation.argument(args::ARGS).map(str::to_string));
        if tag.is_valid() && themes.iter().any(|t| t.variant == tag.variant) {
            return Err(AnalysisError::classification(
                declaration,
                format!(
                    "theme variant '{}' appears twice on '{}'",
                    tag.variant, member.name
                ),
            ));
        }
        themes.push(tag);
    }

    let flags = MemberFlags {
        is_observable: member.has_annotation(annotations::OBSERVABLE),
        can_hover: member.has_annotation(annotations::HOVER),
        can_dependency: member.has_annotation(annotations::DEPENDENCY),
        can_isolated_storage: member.has_annotation(annotations::ISOLATED),
    };

    if themes.is_empty() && config.is_theme_value_type(&member.type_name) {
        tracing::debug!(
            declaration,
            member = %member.name,
            "theme-value type without variants"
        );
    }

    Ok(MemberDescriptor {
        storage_name: member.name.clone(),
        public_name,
        type_name: member.type_name.clone(),
        initializer: member.initializer.clone(),
        flags,
        themes,
    })
}

/// Names of the companions a member expands into.
///
/// Malformed variants contribute nothing; the expander reports them.
fn companion_names(member: &MemberDescriptor) -> Vec<String> {
    let name = member.public_name.as_str();
    let variants = member.themes.iter().filter(|t| t.is_valid());
    match (member.flags.can_hover, member.themes.is_empty()) {
        (true, true) => vec![
            naming::hovered_name(None, name),
            naming::no_hovered_name(None, name),
        ],
        (true, false) => variants
            .flat_map(|t| {
                [
                    naming::hovered_name(Some(&t.variant), name),
                    naming::no_hovered_name(Some(&t.variant), name),
                ]
            })
            .collect(),
        (false, _) => variants
            .map(|t| naming::themed_name(&t.variant, name))
            .collect(),
    }
}

/// Summarizes the members a link target exposes.
///
/// Annotated storage members appear under their public name; public instance
/// properties appear as declared. The first occurrence of a name wins.
#[must_use]
pub fn summarize(declaration: &Declaration, config: &GeneratorConfig) -> Vec<LinkedMember> {
    let mut summary: Vec<LinkedMember> = Vec::new();
    for member in &declaration.members {
        let linked = if is_annotated_member(member) {
            LinkedMember {
                public_name: normalize_public_name(&member.name),
                type_name: member.type_name.clone(),
                can_hover: member.has_annotation(annotations::HOVER),
                is_theme_reactive: member.has_annotation(annotations::THEME_VALUE)
                    || config.is_theme_value_type(&member.type_name),
            }
        } else if member.kind == MemberKind::Property
            && member.accessibility == Accessibility::Public
            && !member.is_static
        {
            LinkedMember {
                public_name: member.name.clone(),
                type_name: member.type_name.clone(),
                can_hover: false,
                is_theme_reactive: false,
            }
        } else {
            continue;
        };

        if !summary.iter().any(|s| s.public_name == linked.public_name) {
            summary.push(linked);
        }
    }
    summary
}
