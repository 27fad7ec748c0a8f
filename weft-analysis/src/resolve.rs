//! Cross-reference resolver.
//!
//! The only phase that needs the whole snapshot. It runs after every
//! candidate is classified and fills in the target of each model link.

use crate::descriptor::{DeclarationDescriptor, LinkKind, LinkTarget, ModelLink};
use crate::error::AnalysisError;
use crate::members::summarize;
use crate::DeclarationAnalysis;
use weft_core::GeneratorConfig;
use weft_schema::SemanticQuery;

/// Looks up the target of one link.
///
/// The first declaration in snapshot order whose simple or qualified name
/// matches wins. A namespace filter requires exact namespace equality.
pub fn resolve_link<Q: SemanticQuery + ?Sized>(
    link: &ModelLink,
    query: &Q,
    config: &GeneratorConfig,
) -> Option<LinkTarget> {
    let id = query.find_declaration(&link.target, link.namespace.as_deref())?;
    let target = query.declaration(id)?;
    Some(LinkTarget {
        id,
        name: target.name.clone(),
        namespace: target.namespace.clone(),
        members: summarize(target, config),
    })
}

/// Resolves every unresolved link of one declaration.
///
/// Already-resolved links are left untouched. Once a view-model link is
/// resolved, the model's hover- and theme-reactive members are delegated:
/// the view no longer expands companions for them.
///
/// # Errors
/// Returns `AnalysisError::Resolution` naming the first link whose target
/// cannot be found.
pub fn resolve_declaration<Q: SemanticQuery + ?Sized>(
    descriptor: &mut DeclarationDescriptor,
    query: &Q,
    config: &GeneratorConfig,
) -> Result<(), AnalysisError> {
    let qualified = descriptor.qualified_name();

    for link in descriptor.links.iter_mut().filter(|l| !l.is_resolved()) {
        let Some(target) = resolve_link(link, query, config) else {
            return Err(AnalysisError::Resolution {
                declaration: qualified,
                target: link.target.clone(),
                namespace: link.namespace.clone(),
            });
        };
        tracing::debug!(
            declaration = %qualified,
            target = %target.qualified_name(),
            kind = ?link.kind,
            "resolved model link"
        );
        link.resolved = Some(target);
    }

    let delegated: Vec<String> = descriptor
        .link(LinkKind::ViewModel)
        .and_then(|link| link.resolved.as_ref())
        .map(|target| {
            target
                .members
                .iter()
                .filter(|m| m.can_hover || m.is_theme_reactive)
                .filter(|m| {
                    descriptor
                        .members
                        .iter()
                        .any(|own| own.has_companions() && own.public_name == m.public_name)
                })
                .map(|m| m.public_name.clone())
                .collect()
        })
        .unwrap_or_default();
    descriptor.delegated = delegated;

    Ok(())
}

/// Resolves links across all classified declarations.
///
/// A declaration whose link does not resolve loses its descriptor: no
/// partial unit is ever emitted for it. Returns the number of declarations
/// that failed.
pub fn resolve<Q: SemanticQuery + ?Sized>(
    analyses: &mut [DeclarationAnalysis],
    query: &Q,
    config: &GeneratorConfig,
) -> usize {
    let mut failed = 0;
    for analysis in analyses.iter_mut() {
        let Some(descriptor) = analysis.descriptor.as_mut() else {
            continue;
        };
        if descriptor.links.is_empty() {
            continue;
        }
        if let Err(error) = resolve_declaration(descriptor, query, config) {
            tracing::warn!(%error, "model link resolution failed");
            analysis.fail(error);
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, ClassificationCache};
    use weft_core::annotations::{self, args};
    use weft_schema::{Annotation, Declaration, DeclarationId, Member, Snapshot};

    fn hover(name: &str) -> Member {
        Member::field(name, "Brush").with_annotation(Annotation::new(annotations::HOVER))
    }

    fn snapshot() -> Snapshot {
        Snapshot::from_declarations(vec![
            Declaration::new("CardView", "App.Views")
                .with_base("Control")
                .with_annotation(
                    Annotation::new(annotations::DATA_CONTEXT)
                        .with_argument(args::TYPE, "CardModel")
                        .with_argument(args::NAMESPACE, "App.Models"),
                )
                .with_member(hover("_background"))
                .with_member(hover("_border")),
            Declaration::new("CardModel", "App.Other"),
            Declaration::new("CardModel", "App.Models")
                .with_member(hover("_background"))
                .with_member(
                    Member::field("_title", "string")
                        .with_annotation(Annotation::new(annotations::OBSERVABLE)),
                ),
        ])
    }

    fn descriptor(snapshot: &Snapshot, index: usize) -> DeclarationDescriptor {
        classify(
            snapshot,
            DeclarationId(index),
            &GeneratorConfig::default(),
            &ClassificationCache::new(),
        )
        .expect("Failed to classify")
        .descriptor
    }

    #[test]
    fn test_resolve_with_namespace_filter() {
        let snapshot = snapshot();
        let mut view = descriptor(&snapshot, 0);

        resolve_declaration(&mut view, &snapshot, &GeneratorConfig::default())
            .expect("Failed to resolve");
        let target = view
            .link(LinkKind::ViewModel)
            .and_then(|l| l.resolved.as_ref())
            .expect("Missing target");
        assert_eq!(target.id, DeclarationId(2));
        assert_eq!(target.qualified_name(), "App.Models.CardModel");
    }

    #[test]
    fn test_resolve_first_match_without_filter() {
        let snapshot = snapshot();
        let link = ModelLink::new(LinkKind::ModelReader, "CardModel", None);
        let target =
            resolve_link(&link, &snapshot, &GeneratorConfig::default()).expect("Missing target");
        assert_eq!(target.namespace, "App.Other");

        let link = ModelLink::new(LinkKind::ModelReader, "App.Models.CardModel", None);
        let target =
            resolve_link(&link, &snapshot, &GeneratorConfig::default()).expect("Missing target");
        assert_eq!(target.namespace, "App.Models");
    }

    #[test]
    fn test_view_delegates_model_reactive_members() {
        let snapshot = snapshot();
        let mut view = descriptor(&snapshot, 0);

        resolve_declaration(&mut view, &snapshot, &GeneratorConfig::default())
            .expect("Failed to resolve");
        assert_eq!(view.delegated, vec!["Background"]);
        let own: Vec<_> = view.companion_members().map(|m| m.public_name.as_str()).collect();
        assert_eq!(own, vec!["Border"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let snapshot = snapshot();
        let config = GeneratorConfig::default();
        let mut view = descriptor(&snapshot, 0);

        resolve_declaration(&mut view, &snapshot, &config).expect("Failed to resolve");
        let first = view.clone();
        resolve_declaration(&mut view, &snapshot, &config).expect("Failed to resolve");
        assert_eq!(view, first);
    }

    #[test]
    fn test_unresolved_link_names_type_and_filter() {
        let snapshot = Snapshot::from_declarations(vec![Declaration::new("Binding", "App").with_annotation(
            Annotation::new(annotations::CONTEXT_CONFIG)
                .with_argument(args::VIEW, "Binding")
                .with_argument(args::MODEL, "MissingModel")
                .with_argument(args::MODEL_NAMESPACE, "App.Models"),
        )]);
        let mut binding = descriptor(&snapshot, 0);

        let err = resolve_declaration(&mut binding, &snapshot, &GeneratorConfig::default())
            .expect_err("Should fail");
        assert_eq!(
            err,
            AnalysisError::Resolution {
                declaration: "App.Binding".to_string(),
                target: "MissingModel".to_string(),
                namespace: Some("App.Models".to_string()),
            }
        );
    }

    #[test]
    fn test_namespace_mismatch_is_an_error() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App").with_annotation(
                Annotation::new(annotations::MODEL_READER)
                    .with_argument(args::TYPE, "CardData")
                    .with_argument(args::NAMESPACE, "App.Data"),
            ),
            Declaration::new("CardData", "App.Dto"),
        ]);
        let mut card = descriptor(&snapshot, 0);

        assert!(resolve_declaration(&mut card, &snapshot, &GeneratorConfig::default()).is_err());
    }
}
