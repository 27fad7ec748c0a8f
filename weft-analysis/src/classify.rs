//! Semantic classifier.
//!
//! `classify` is a pure function of one declaration, the read-only query
//! service and the configuration. The only state it touches is the per-run
//! [`ClassificationCache`] memoizing base-type walks.

use crate::descriptor::{
    ConstructorHook, DeclarationDescriptor, DeclarationFlags, LinkKind, ModelLink, SurfaceKind,
    SurfaceMember,
};
use crate::error::AnalysisError;
use crate::members::{build_members, is_annotated_member, MemberSet};
use parking_lot::RwLock;
use std::collections::HashMap;
use weft_core::annotations::{self, args};
use weft_core::GeneratorConfig;
use weft_schema::{
    Accessibility, Annotation, BaseRef, Declaration, DeclarationId, MemberKind, SemanticQuery,
};

/// Facts gathered by walking a declaration's base-type chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineage {
    /// Base types, nearest first.
    pub chain: Vec<String>,
    /// The chain reaches a toolkit visual root.
    pub is_view_bound: bool,
    /// An ancestor already provides change notification.
    pub inherits_notification: bool,
}

/// Memoized base-type walks, private to one run.
///
/// Shared by the parallel classification workers; readers never block each
/// other.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    lineages: RwLock<HashMap<DeclarationId, Lineage>>,
}

impl ClassificationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of memoized walks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lineages.read().len()
    }

    /// Returns true if nothing has been memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lineages.read().is_empty()
    }

    /// Walks the base-type chain of `id`, reusing memoized walks.
    ///
    /// # Errors
    /// Returns `AnalysisError::Classification` when the chain is longer than
    /// `config.max_base_depth()`.
    pub fn lineage<Q: SemanticQuery + ?Sized>(
        &self,
        query: &Q,
        id: DeclarationId,
        config: &GeneratorConfig,
    ) -> Result<Lineage, AnalysisError> {
        if let Some(cached) = self.lineages.read().get(&id) {
            return Ok(cached.clone());
        }

        let mut lineage = Lineage::default();
        let mut current = id;
        while !lineage.is_view_bound {
            let Some(base) = query.base_type(current) else {
                break;
            };
            if lineage.chain.len() >= config.max_base_depth() {
                return Err(depth_error(query, id, config));
            }

            match base {
                BaseRef::External(name) => {
                    lineage.chain.push(name.to_string());
                    lineage.is_view_bound = config.is_visual_root(name);
                    break;
                }
                BaseRef::Declared(base_id) => {
                    let Some(decl) = query.declaration(base_id) else {
                        break;
                    };
                    lineage.chain.push(decl.qualified_name());
                    lineage.is_view_bound = config.is_visual_root(&decl.name);
                    lineage.inherits_notification |= provides_notification(decl);

                    if let Some(cached) = self.lineages.read().get(&base_id) {
                        lineage.chain.extend(cached.chain.iter().cloned());
                        lineage.is_view_bound |= cached.is_view_bound;
                        lineage.inherits_notification |= cached.inherits_notification;
                        break;
                    }
                    current = base_id;
                }
            }
        }

        if lineage.chain.len() > config.max_base_depth() {
            return Err(depth_error(query, id, config));
        }

        self.lineages.write().insert(id, lineage.clone());
        Ok(lineage)
    }
}

fn depth_error<Q: SemanticQuery + ?Sized>(
    query: &Q,
    id: DeclarationId,
    config: &GeneratorConfig,
) -> AnalysisError {
    let declaration = query
        .declaration(id)
        .map(Declaration::qualified_name)
        .unwrap_or_default();
    AnalysisError::classification(
        declaration,
        format!("base-type chain exceeds depth {}", config.max_base_depth()),
    )
}

/// Returns true if a declaration implements change notification itself.
fn provides_notification(declaration: &Declaration) -> bool {
    declaration.implements(annotations::NOTIFY_CONTRACT)
        || declaration
            .members
            .iter()
            .any(|m| is_annotated_member(m) && m.has_annotation(annotations::OBSERVABLE))
}

/// Result of classifying one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The descriptor.
    pub descriptor: DeclarationDescriptor,
    /// Non-fatal findings (name collisions).
    pub diagnostics: Vec<AnalysisError>,
}

/// Classifies one declaration.
///
/// # Errors
/// Returns `AnalysisError::Classification` when annotation data is missing,
/// ambiguous or contradicts the declaration's shape, or when the base-type
/// walk exceeds its bound.
pub fn classify<Q: SemanticQuery + ?Sized>(
    query: &Q,
    id: DeclarationId,
    config: &GeneratorConfig,
    cache: &ClassificationCache,
) -> Result<Classification, AnalysisError> {
    let Some(decl) = query.declaration(id) else {
        return Err(AnalysisError::classification(
            format!("#{}", id.0),
            "declaration is not part of the snapshot",
        ));
    };
    let qualified = decl.qualified_name();
    let lineage = cache.lineage(query, id, config)?;

    let links = collect_links(decl, &qualified)?;
    let is_context_config = links.iter().any(|l| l.kind == LinkKind::ContextView);
    let is_view_bound = lineage.is_view_bound;

    if !is_view_bound && links.iter().any(|l| l.kind == LinkKind::ViewModel) {
        return Err(AnalysisError::classification(
            &qualified,
            "data context requires a view-bound declaration",
        ));
    }

    // A context-config declaration only carries a binding; its members are
    // not synthesized.
    let MemberSet {
        members,
        collisions,
    } = if is_context_config {
        MemberSet::default()
    } else {
        build_members(decl, config)?
    };

    if !is_view_bound
        && let Some(member) = members.iter().find(|m| m.flags.can_dependency)
    {
        return Err(AnalysisError::classification(
            &qualified,
            format!(
                "dependency member '{}' requires a view-bound declaration",
                member.storage_name
            ),
        ));
    }

    let (constructor_hooks, tick_methods) = if is_context_config {
        (Vec::new(), Vec::new())
    } else {
        (
            collect_hooks(decl, &qualified)?,
            collect_ticks(decl, &qualified)?,
        )
    };

    let periodic = decl.annotations_named(annotations::PERIODIC_UPDATE).next();
    let tick_interval_ms = match periodic.and_then(|a| a.argument(args::INTERVAL)) {
        Some(text) => match text.trim().parse::<u64>() {
            Ok(interval) if interval > 0 => interval,
            _ => {
                return Err(AnalysisError::classification(
                    &qualified,
                    format!("invalid periodic update interval '{text}'"),
                ));
            }
        },
        None => config.tick_interval_ms(),
    };

    let flags = DeclarationFlags {
        is_proxy_target: decl.has_annotation(annotations::ASPECT),
        is_observable_model: members.iter().any(|m| m.flags.is_observable),
        is_theme_aware: decl.has_annotation(annotations::THEME)
            || members.iter().any(|m| m.is_theme_reactive())
            || decl
                .members
                .iter()
                .any(|m| m.kind == MemberKind::Field && config.is_theme_value_type(&m.type_name)),
        is_view_bound,
        is_clickable: decl.has_annotation(annotations::CLICKABLE),
        is_periodic_update: periodic.is_some() || !tick_methods.is_empty(),
        has_model_mapping: links
            .iter()
            .any(|l| matches!(l.kind, LinkKind::ViewModel | LinkKind::ModelReader)),
        is_context_config,
        inherits_notification: lineage.inherits_notification
            || decl.implements(annotations::NOTIFY_CONTRACT),
    };

    tracing::debug!(declaration = %qualified, ?flags, members = members.len(), "classified");

    Ok(Classification {
        descriptor: DeclarationDescriptor {
            id,
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            accessibility: decl.accessibility,
            kind: decl.kind,
            base_chain: lineage.chain,
            flags,
            members,
            links,
            constructor_hooks,
            tick_methods,
            tick_interval_ms,
            surface: collect_surface(decl),
            usings: decl.usings.clone(),
            delegated: Vec::new(),
        },
        diagnostics: collisions,
    })
}

/// Returns the single occurrence of a declaration annotation, if any.
fn single<'a>(
    decl: &'a Declaration,
    known: &'a str,
    qualified: &str,
) -> Result<Option<&'a Annotation>, AnalysisError> {
    let mut found = decl.annotations_named(known);
    let first = found.next();
    if found.next().is_some() {
        return Err(AnalysisError::classification(
            qualified,
            format!("'{known}' may appear only once"),
        ));
    }
    Ok(first)
}

fn required<'a>(
    annotation: &'a Annotation,
    key: &str,
    qualified: &str,
) -> Result<&'a str, AnalysisError> {
    match annotation.argument(key).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AnalysisError::classification(
            qualified,
            format!("'{}' is missing the '{key}' argument", annotation.name),
        )),
    }
}

fn optional(annotation: &Annotation, key: &str) -> Option<String> {
    annotation
        .argument(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn collect_links(decl: &Declaration, qualified: &str) -> Result<Vec<ModelLink>, AnalysisError> {
    let mut links = Vec::new();

    if let Some(annotation) = single(decl, annotations::DATA_CONTEXT, qualified)? {
        links.push(ModelLink::new(
            LinkKind::ViewModel,
            required(annotation, args::TYPE, qualified)?,
            optional(annotation, args::NAMESPACE),
        ));
    }

    if let Some(annotation) = single(decl, annotations::MODEL_READER, qualified)? {
        links.push(ModelLink::new(
            LinkKind::ModelReader,
            required(annotation, args::TYPE, qualified)?,
            optional(annotation, args::NAMESPACE),
        ));
    }

    if let Some(annotation) = single(decl, annotations::CONTEXT_CONFIG, qualified)? {
        links.push(ModelLink::new(
            LinkKind::ContextView,
            required(annotation, args::VIEW, qualified)?,
            optional(annotation, args::VIEW_NAMESPACE),
        ));
        links.push(ModelLink::new(
            LinkKind::ContextModel,
            required(annotation, args::MODEL, qualified)?,
            optional(annotation, args::MODEL_NAMESPACE),
        ));
    }

    Ok(links)
}

fn collect_hooks(decl: &Declaration, qualified: &str) -> Result<Vec<ConstructorHook>, AnalysisError> {
    decl.members
        .iter()
        .filter(|m| m.kind == MemberKind::Method && m.has_annotation(annotations::ON_CONSTRUCT))
        .map(|m| {
            if m.is_static {
                return Err(AnalysisError::classification(
                    qualified,
                    format!("construction method '{}' must not be static", m.name),
                ));
            }
            Ok(ConstructorHook {
                method: m.name.clone(),
                parameters: m.parameters.clone(),
            })
        })
        .collect()
}

fn collect_ticks(decl: &Declaration, qualified: &str) -> Result<Vec<String>, AnalysisError> {
    decl.members
        .iter()
        .filter(|m| m.kind == MemberKind::Method && m.has_annotation(annotations::TICK))
        .map(|m| {
            if m.is_static || !m.parameters.is_empty() {
                return Err(AnalysisError::classification(
                    qualified,
                    format!(
                        "tick method '{}' must be an instance method without parameters",
                        m.name
                    ),
                ));
            }
            Ok(m.name.clone())
        })
        .collect()
}

fn collect_surface(decl: &Declaration) -> Vec<SurfaceMember> {
    decl.members
        .iter()
        .filter(|m| m.accessibility == Accessibility::Public && !m.is_static)
        .filter_map(|m| {
            let kind = match m.kind {
                MemberKind::Property => SurfaceKind::Property,
                MemberKind::Method => SurfaceKind::Method,
                MemberKind::Field => return None,
            };
            Some(SurfaceMember {
                name: m.name.clone(),
                type_name: m.type_name.clone(),
                kind,
                parameters: m.parameters.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_schema::{Member, Parameter, Snapshot};

    fn classify_first(snapshot: &Snapshot) -> Result<Classification, AnalysisError> {
        classify_at(snapshot, 0)
    }

    fn classify_at(snapshot: &Snapshot, index: usize) -> Result<Classification, AnalysisError> {
        classify(
            snapshot,
            DeclarationId(index),
            &GeneratorConfig::default(),
            &ClassificationCache::new(),
        )
    }

    fn observable(name: &str, ty: &str) -> Member {
        Member::field(name, ty).with_annotation(Annotation::new(annotations::OBSERVABLE))
    }

    #[test]
    fn test_card_is_observable_model_only() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Card", "App").with_member(observable("_title", "string")),
        ]);

        let result = classify_first(&snapshot).expect("Failed to classify");
        let flags = result.descriptor.flags;
        assert_eq!(
            flags,
            DeclarationFlags {
                is_observable_model: true,
                ..DeclarationFlags::default()
            }
        );
        assert_eq!(result.descriptor.members[0].public_name, "Title");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_flags_are_independent() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Widget", "App")
                .with_annotation(Annotation::new(annotations::ASPECT))
                .with_annotation(Annotation::new(annotations::THEME))
                .with_annotation(Annotation::new(annotations::CLICKABLE))
                .with_member(observable("_title", "string")),
        ]);

        let flags = classify_first(&snapshot).expect("Failed to classify").descriptor.flags;
        assert!(flags.is_proxy_target);
        assert!(flags.is_observable_model);
        assert!(flags.is_theme_aware);
        assert!(flags.is_clickable);
        assert!(!flags.is_view_bound);
        assert!(!flags.is_periodic_update);
    }

    #[test]
    fn test_theme_aware_from_member() {
        let snapshot = Snapshot::from_declarations(vec![Declaration::new("Panel", "App").with_member(
            Member::field("_bg", "Brush").with_annotation(
                Annotation::new(annotations::THEME_VALUE).with_argument(args::VARIANT, "Themes.Dark"),
            ),
        )]);

        let flags = classify_first(&snapshot).expect("Failed to classify").descriptor.flags;
        assert!(flags.is_theme_aware);
        assert!(!flags.is_observable_model);
    }

    #[test]
    fn test_theme_aware_from_theme_value_type() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Panel", "App").with_member(Member::field("_palette", "Palette")),
        ]);
        let config = GeneratorConfig::default().with_theme_value_types(["Palette"]);

        let result = classify(&snapshot, DeclarationId(0), &config, &ClassificationCache::new())
            .expect("Failed to classify");
        assert!(result.descriptor.flags.is_theme_aware);
    }

    #[test]
    fn test_view_bound_transitively() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("CardView", "App").with_base("ViewBase"),
            Declaration::new("ViewBase", "App").with_base("System.Windows.Controls.Control"),
        ]);

        let result = classify_first(&snapshot).expect("Failed to classify");
        assert!(result.descriptor.flags.is_view_bound);
        assert_eq!(
            result.descriptor.base_chain,
            vec!["App.ViewBase", "System.Windows.Controls.Control"]
        );
    }

    #[test]
    fn test_base_walk_is_bounded() {
        // A base cycle cannot be written in the host language, but the walk must
        // still terminate on it.
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("A", "App").with_base("B"),
            Declaration::new("B", "App").with_base("A"),
        ]);

        let result = classify_first(&snapshot);
        assert!(matches!(
            result,
            Err(AnalysisError::Classification { ref message, .. }) if message.contains("depth")
        ));
    }

    #[test]
    fn test_cache_reuses_walks() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Root", "App").with_base("FrameworkElement"),
            Declaration::new("Mid", "App").with_base("Root"),
            Declaration::new("Leaf", "App").with_base("Mid"),
        ]);
        let cache = ClassificationCache::new();
        let config = GeneratorConfig::default();

        let mid = cache
            .lineage(&snapshot, DeclarationId(1), &config)
            .expect("Failed to walk");
        assert!(mid.is_view_bound);
        assert_eq!(cache.len(), 1);

        let leaf = cache
            .lineage(&snapshot, DeclarationId(2), &config)
            .expect("Failed to walk");
        assert_eq!(leaf.chain, vec!["App.Mid", "App.Root", "FrameworkElement"]);
        assert!(leaf.is_view_bound);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_inherits_notification() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Derived", "App")
                .with_base("Base")
                .with_member(observable("_count", "int")),
            Declaration::new("Base", "App").with_member(observable("_title", "string")),
            Declaration::new("Plain", "App")
                .with_interface("INotifyPropertyChanged")
                .with_member(observable("_name", "string")),
        ]);

        let derived = classify_at(&snapshot, 0).expect("Failed to classify");
        assert!(derived.descriptor.flags.inherits_notification);
        assert!(!derived.descriptor.flags.needs_notification_contract());

        let base = classify_at(&snapshot, 1).expect("Failed to classify");
        assert!(base.descriptor.flags.needs_notification_contract());

        let plain = classify_at(&snapshot, 2).expect("Failed to classify");
        assert!(plain.descriptor.flags.inherits_notification);
    }

    #[test]
    fn test_links_collected() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("CardView", "App.Views")
                .with_base("Control")
                .with_annotation(
                    Annotation::new(annotations::DATA_CONTEXT)
                        .with_argument(args::TYPE, "CardModel")
                        .with_argument(args::NAMESPACE, "App.Models"),
                ),
        ]);

        let descriptor = classify_first(&snapshot).expect("Failed to classify").descriptor;
        assert!(descriptor.flags.has_model_mapping);
        let link = descriptor.link(LinkKind::ViewModel).expect("Missing link");
        assert_eq!(link.target, "CardModel");
        assert_eq!(link.namespace.as_deref(), Some("App.Models"));
        assert!(!link.is_resolved());
    }

    #[test]
    fn test_context_config_suppresses_members() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("CardBinding", "App")
                .with_annotation(
                    Annotation::new(annotations::CONTEXT_CONFIG)
                        .with_argument(args::VIEW, "CardView")
                        .with_argument(args::MODEL, "CardModel"),
                )
                .with_member(observable("_title", "string"))
                .with_member(
                    Member::method("Init", "void").with_annotation(Annotation::new(annotations::ON_CONSTRUCT)),
                ),
        ]);

        let descriptor = classify_first(&snapshot).expect("Failed to classify").descriptor;
        assert!(descriptor.flags.is_context_config);
        assert!(!descriptor.flags.has_model_mapping);
        assert!(descriptor.members.is_empty());
        assert!(descriptor.constructor_hooks.is_empty());
        assert_eq!(descriptor.links.len(), 2);
        assert_eq!(descriptor.links[1].kind, LinkKind::ContextModel);
    }

    #[test]
    fn test_periodic_update() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Clock", "App")
                .with_annotation(Annotation::new(annotations::PERIODIC_UPDATE).with_argument(args::INTERVAL, "250"))
                .with_member(Member::method("Advance", "void").with_annotation(Annotation::new(annotations::TICK))),
            Declaration::new("Ticker", "App")
                .with_member(Member::method("Step", "void").with_annotation(Annotation::new(annotations::TICK))),
        ]);

        let clock = classify_at(&snapshot, 0).expect("Failed to classify").descriptor;
        assert!(clock.flags.is_periodic_update);
        assert_eq!(clock.tick_interval_ms, 250);
        assert_eq!(clock.tick_methods, vec!["Advance"]);

        let ticker = classify_at(&snapshot, 1).expect("Failed to classify").descriptor;
        assert!(ticker.flags.is_periodic_update);
        assert_eq!(ticker.tick_interval_ms, 16);
    }

    #[test]
    fn test_constructor_hooks_and_surface() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Service", "App")
                .with_annotation(Annotation::new(annotations::ASPECT))
                .with_member(
                    Member::method("Load", "void")
                        .with_accessibility(Accessibility::Public)
                        .with_annotation(Annotation::new(annotations::ON_CONSTRUCT))
                        .with_parameter(Parameter::new("id", "int")),
                )
                .with_member(Member::property("Name", "string"))
                .with_member(Member::method("Helper", "int"))
                .with_member(Member::property("Count", "int").with_static()),
        ]);

        let descriptor = classify_first(&snapshot).expect("Failed to classify").descriptor;
        assert_eq!(descriptor.constructor_hooks.len(), 1);
        assert_eq!(descriptor.constructor_hooks[0].signature(), vec!["int"]);
        let surface: Vec<_> = descriptor.surface.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(surface, vec!["Load", "Name"]);
    }

    #[test]
    fn test_classification_errors() {
        let data_context = Annotation::new(annotations::DATA_CONTEXT).with_argument(args::TYPE, "M");
        let cases = vec![
            // data context outside a view
            Declaration::new("A", "App").with_annotation(data_context.clone()),
            // duplicated link
            Declaration::new("B", "App")
                .with_base("Control")
                .with_annotation(data_context.clone())
                .with_annotation(data_context),
            // missing argument
            Declaration::new("C", "App").with_annotation(Annotation::new(annotations::MODEL_READER)),
            // dependency outside a view
            Declaration::new("D", "App").with_member(
                Member::field("_x", "int").with_annotation(Annotation::new(annotations::DEPENDENCY)),
            ),
            // bad interval
            Declaration::new("E", "App").with_annotation(
                Annotation::new(annotations::PERIODIC_UPDATE).with_argument(args::INTERVAL, "soon"),
            ),
            // tick with parameters
            Declaration::new("F", "App").with_member(
                Member::method("Step", "void")
                    .with_annotation(Annotation::new(annotations::TICK))
                    .with_parameter(Parameter::new("dt", "double")),
            ),
            // static construction hook
            Declaration::new("G", "App").with_member(
                Member::method("Init", "void")
                    .with_static()
                    .with_annotation(Annotation::new(annotations::ON_CONSTRUCT)),
            ),
        ];

        for decl in cases {
            let name = decl.name.clone();
            let snapshot = Snapshot::from_declarations(vec![decl]);
            assert!(
                matches!(classify_first(&snapshot), Err(AnalysisError::Classification { .. })),
                "expected classification error for {name}"
            );
        }
    }

    #[test]
    fn test_dependency_on_view() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("CardView", "App").with_base("UIElement").with_member(
                Member::field("_x", "int").with_annotation(Annotation::new(annotations::DEPENDENCY)),
            ),
        ]);

        let descriptor = classify_first(&snapshot).expect("Failed to classify").descriptor;
        assert!(descriptor.members[0].flags.can_dependency);
        assert!(descriptor.flags.is_view_bound);
    }
}
