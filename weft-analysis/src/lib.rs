//! # Weft Analysis
//!
//! Classification, resolution and expansion phases of the weft generator.
//!
//! This crate provides:
//! - The declaration filter selecting candidate declarations
//! - The semantic classifier producing explicit classification flags
//! - The member descriptor builder and its naming checks
//! - The cross-reference resolver linking views, models and data shapes
//! - The theme/hover combinatorial expander
//! - Structured diagnostics for every declaration-scoped failure
//!
//! [`analyze`] runs all phases over a snapshot: classification and expansion
//! in parallel, resolution as a sequential barrier between them.

pub mod classify;
pub mod descriptor;
pub mod error;
pub mod expand;
pub mod filter;
pub mod members;
pub mod resolve;

pub use classify::{classify, Classification, ClassificationCache};
pub use descriptor::{
    ConstructorHook, DeclarationDescriptor, DeclarationFlags, LinkKind, LinkTarget, LinkedMember,
    MemberDescriptor, MemberFlags, ModelLink, SurfaceKind, SurfaceMember, ThemeVariantTag,
};
pub use error::{AnalysisError, Diagnostic, Severity};
pub use expand::{expand, Companion, CompanionKind, CompanionPlan, Storage, ThemeScope};
pub use filter::select_candidates;
pub use members::{build_members, MemberSet};
pub use resolve::{resolve, resolve_declaration};

use rayon::prelude::*;
use weft_core::GeneratorConfig;
use weft_schema::{DeclarationId, SemanticQuery};

/// Analysis outcome of one candidate declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationAnalysis {
    /// Identity in the snapshot.
    pub id: DeclarationId,
    /// Qualified name.
    pub qualified_name: String,
    /// Descriptor; `None` once a fatal error was raised.
    pub descriptor: Option<DeclarationDescriptor>,
    /// Companion plans in member order.
    pub plans: Vec<CompanionPlan>,
    /// Diagnostics in the order they were raised.
    pub diagnostics: Vec<Diagnostic>,
}

impl DeclarationAnalysis {
    /// Records a fatal error: the descriptor and plans are dropped.
    pub fn fail(&mut self, error: AnalysisError) {
        self.descriptor = None;
        self.plans.clear();
        self.diagnostics.push(error.into());
    }

    /// Returns true if no unit may be emitted for this declaration.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.descriptor.is_none()
    }

    /// Returns true if the declaration yields a compilation unit.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.descriptor
            .as_ref()
            .is_some_and(DeclarationDescriptor::has_generation_reason)
    }
}

/// Result of analysing a whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// One entry per candidate, in snapshot order.
    pub declarations: Vec<DeclarationAnalysis>,
}

impl Analysis {
    /// Descriptors of declarations that yield a compilation unit.
    pub fn generated(&self) -> impl Iterator<Item = &DeclarationAnalysis> {
        self.declarations.iter().filter(|d| d.is_generated())
    }

    /// Every diagnostic, in snapshot order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.declarations.iter().flat_map(|d| d.diagnostics.iter())
    }

    /// Qualified names of declarations that failed.
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.declarations
            .iter()
            .filter(|d| d.is_failed())
            .map(|d| d.qualified_name.as_str())
    }

    /// Returns the analysis of the declaration with the given qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&DeclarationAnalysis> {
        self.declarations
            .iter()
            .find(|d| d.qualified_name == qualified_name)
    }
}

/// Runs filter, classification, resolution and expansion over a snapshot.
pub fn analyze<Q: SemanticQuery + ?Sized>(query: &Q, config: &GeneratorConfig) -> Analysis {
    let candidates = select_candidates(query);
    let cache = ClassificationCache::new();

    let mut declarations: Vec<DeclarationAnalysis> = candidates
        .par_iter()
        .map(|&id| {
            let qualified_name = query
                .declaration(id)
                .map(|d| d.qualified_name())
                .unwrap_or_default();
            let mut analysis = DeclarationAnalysis {
                id,
                qualified_name,
                descriptor: None,
                plans: Vec::new(),
                diagnostics: Vec::new(),
            };
            match classify(query, id, config, &cache) {
                Ok(classification) => {
                    analysis.descriptor = Some(classification.descriptor);
                    analysis
                        .diagnostics
                        .extend(classification.diagnostics.into_iter().map(Diagnostic::from));
                }
                Err(error) => {
                    tracing::warn!(%error, "classification failed");
                    analysis.fail(error);
                }
            }
            analysis
        })
        .collect();

    let failed = resolve(&mut declarations, query, config);

    declarations.par_iter_mut().for_each(|analysis| {
        if let Some(descriptor) = analysis.descriptor.as_ref() {
            let (plans, errors) = expand(descriptor);
            analysis.plans = plans;
            analysis
                .diagnostics
                .extend(errors.into_iter().map(Diagnostic::from));
        }
    });

    tracing::info!(
        candidates = declarations.len(),
        failed,
        memoized = cache.len(),
        "analysis complete"
    );
    Analysis { declarations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::annotations::{self, args};
    use weft_schema::{Annotation, Declaration, Member, Snapshot};

    fn observable(name: &str) -> Member {
        Member::field(name, "string").with_annotation(Annotation::new(annotations::OBSERVABLE))
    }

    #[test]
    fn test_analyze_keeps_snapshot_order() {
        let snapshot = Snapshot::from_declarations(
            (0..32)
                .map(|i| Declaration::new(format!("Card{i}"), "App").with_member(observable("_title")))
                .collect(),
        );

        let analysis = analyze(&snapshot, &GeneratorConfig::default());
        let names: Vec<_> = analysis
            .declarations
            .iter()
            .map(|d| d.qualified_name.clone())
            .collect();
        let expected: Vec<_> = (0..32).map(|i| format!("App.Card{i}")).collect();
        assert_eq!(names, expected);
        assert_eq!(analysis.generated().count(), 32);
    }

    #[test]
    fn test_failures_do_not_block_others() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Binding", "App").with_annotation(
                Annotation::new(annotations::CONTEXT_CONFIG)
                    .with_argument(args::VIEW, "Missing")
                    .with_argument(args::MODEL, "Card"),
            ),
            Declaration::new("Card", "App")
                .with_member(observable("_title"))
                .with_member(observable("title")),
        ]);

        let analysis = analyze(&snapshot, &GeneratorConfig::default());
        assert_eq!(analysis.failures().collect::<Vec<_>>(), vec!["App.Binding"]);

        let card = analysis.get("App.Card").expect("Missing card");
        assert!(card.is_generated());
        assert_eq!(card.diagnostics.len(), 1);
        assert_eq!(card.diagnostics[0].severity, Severity::Error);
        assert!(!card.is_failed());

        let severities: Vec<_> = analysis.diagnostics().map(|d| d.severity).collect();
        assert_eq!(severities, vec![Severity::Error, Severity::Error]);
    }

    #[test]
    fn test_plain_declaration_is_not_generated() {
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("Plain", "App").with_member(Member::field("_x", "int")),
            Declaration::new("View", "App").with_base("Control"),
        ]);

        let analysis = analyze(&snapshot, &GeneratorConfig::default());
        assert_eq!(analysis.declarations.len(), 2);
        assert_eq!(analysis.generated().count(), 0);
        assert_eq!(analysis.failures().count(), 0);
    }

    #[test]
    fn test_expansion_runs_after_resolution() {
        let hover = |name: &str| Member::field(name, "Brush").with_annotation(Annotation::new(annotations::HOVER));
        let snapshot = Snapshot::from_declarations(vec![
            Declaration::new("CardView", "App")
                .with_base("Control")
                .with_annotation(Annotation::new(annotations::DATA_CONTEXT).with_argument(args::TYPE, "CardModel"))
                .with_member(hover("_background"))
                .with_member(hover("_border")),
            Declaration::new("CardModel", "App").with_member(hover("_background")),
        ]);

        let analysis = analyze(&snapshot, &GeneratorConfig::default());
        let view = analysis.get("App.CardView").expect("Missing view");
        let planned: Vec<_> = view.plans.iter().map(|p| p.member.as_str()).collect();
        assert_eq!(planned, vec!["Border"]);

        let model = analysis.get("App.CardModel").expect("Missing model");
        assert_eq!(model.plans.len(), 1);
    }
}
