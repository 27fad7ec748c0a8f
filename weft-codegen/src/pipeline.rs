//! Generation pipeline.
//!
//! Runs analysis, then synthesizes every generated declaration in parallel.
//! Units are memoized by a fingerprint of everything synthesis reads, so a
//! re-run over an unchanged declaration reuses the previous unit.

use crate::error::CodegenError;
use crate::ir::CodeUnit;
use crate::synthesizer::Synthesizer;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use weft_analysis::{CompanionPlan, DeclarationDescriptor, Diagnostic, Severity, analyze};
use weft_core::GeneratorConfig;
use weft_schema::SemanticQuery;

/// Memoized compilation units keyed by input fingerprint.
#[derive(Debug, Default)]
pub struct UnitCache {
    units: Mutex<HashMap<u64, Arc<CodeUnit>>>,
}

impl UnitCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached unit for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: u64) -> Option<Arc<CodeUnit>> {
        self.units.lock().get(&fingerprint).cloned()
    }

    /// Stores a unit.
    pub fn insert(&self, fingerprint: u64, unit: Arc<CodeUnit>) {
        self.units.lock().insert(fingerprint, unit);
    }

    /// Number of cached units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.lock().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.lock().is_empty()
    }

    /// Drops every unit whose fingerprint is not in `live`.
    pub fn retain(&self, live: &HashSet<u64>) {
        self.units.lock().retain(|key, _| live.contains(key));
    }

    /// Drops every cached unit.
    pub fn clear(&self) {
        self.units.lock().clear();
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Emitted units, in snapshot order.
    pub units: Vec<Arc<CodeUnit>>,
    /// Every diagnostic, in snapshot order.
    pub diagnostics: Vec<Diagnostic>,
    /// Qualified names of declarations that produced no unit because of an error.
    pub failures: Vec<String>,
    /// Number of units taken from the cache.
    pub reused: usize,
}

impl GenerationReport {
    /// Returns the unit with the given hint name.
    #[must_use]
    pub fn unit(&self, hint_name: &str) -> Option<&CodeUnit> {
        self.units
            .iter()
            .map(Arc::as_ref)
            .find(|u| u.hint_name == hint_name)
    }

    /// Returns true if any error-severity diagnostic was raised.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Writes every unit into `dir` under its hint name.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory or a file cannot be written.
    pub fn write_units(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            let path = dir.join(&unit.hint_name);
            std::fs::write(&path, unit.render())?;
            written.push(path);
        }
        Ok(written)
    }

    /// Lists the units whose file in `dir` is missing or differs from the
    /// rendered text.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if an existing file cannot be read.
    pub fn stale_units(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let mut stale = Vec::new();
        for unit in &self.units {
            let path = dir.join(&unit.hint_name);
            let current = match std::fs::read_to_string(&path) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            };
            if current.as_deref() != Some(unit.render().as_str()) {
                stale.push(path);
            }
        }
        Ok(stale)
    }
}

/// Generation pipeline holding the configuration and the unit cache.
#[derive(Debug, Default)]
pub struct Pipeline {
    config: GeneratorConfig,
    cache: UnitCache,
}

impl Pipeline {
    /// Creates a pipeline with an empty cache.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            cache: UnitCache::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the unit cache.
    #[must_use]
    pub fn cache(&self) -> &UnitCache {
        &self.cache
    }

    /// Runs every phase over a snapshot.
    ///
    /// A declaration that fails never blocks the others; its diagnostics are
    /// reported and its name is listed in `failures`. Cached units not used
    /// by this run are evicted.
    pub fn run<Q: SemanticQuery + ?Sized>(&self, query: &Q) -> GenerationReport {
        let analysis = analyze(query, &self.config);
        let mut diagnostics: Vec<Diagnostic> = analysis.diagnostics().cloned().collect();
        let mut failures: Vec<String> = analysis.failures().map(str::to_string).collect();

        let generated: Vec<_> = analysis
            .generated()
            .filter_map(|d| d.descriptor.as_ref().map(|desc| (desc, d.plans.as_slice())))
            .collect();

        let keys: Vec<u64> = generated
            .iter()
            .map(|&(descriptor, plans)| fingerprint(descriptor, plans, &self.config))
            .collect();
        let outcomes: Vec<_> = generated
            .par_iter()
            .zip(keys.par_iter())
            .map(|(&(descriptor, plans), &key)| self.unit(key, descriptor, plans))
            .collect();
        self.cache.retain(&keys.into_iter().collect());

        let mut units = Vec::with_capacity(outcomes.len());
        let mut reused = 0;
        for ((descriptor, _), outcome) in generated.iter().zip(outcomes) {
            match outcome {
                Ok((unit, hit)) => {
                    reused += usize::from(hit);
                    units.push(unit);
                }
                Err(error) => {
                    tracing::warn!(%error, "synthesis failed");
                    failures.push(descriptor.qualified_name());
                    diagnostics.extend(synthesis_diagnostic(&error, descriptor));
                }
            }
        }

        tracing::info!(
            units = units.len(),
            reused,
            failures = failures.len(),
            diagnostics = diagnostics.len(),
            "generation complete"
        );
        GenerationReport {
            units,
            diagnostics,
            failures,
            reused,
        }
    }

    /// Returns the cached unit or synthesizes and caches a new one. The flag
    /// is true on a cache hit.
    fn unit(
        &self,
        key: u64,
        descriptor: &DeclarationDescriptor,
        plans: &[CompanionPlan],
    ) -> Result<(Arc<CodeUnit>, bool), CodegenError> {
        if let Some(unit) = self.cache.get(key) {
            tracing::debug!(declaration = %descriptor.qualified_name(), "reused cached unit");
            return Ok((unit, true));
        }
        let unit = Arc::new(Synthesizer::new(descriptor, plans, &self.config).synthesize()?);
        self.cache.insert(key, Arc::clone(&unit));
        Ok((unit, false))
    }
}

/// Hash of every input synthesis reads for one declaration.
///
/// Snapshot positions are not part of the hash, so an unchanged declaration
/// keeps its fingerprint when other declarations are added or removed.
#[must_use]
pub fn fingerprint(
    descriptor: &DeclarationDescriptor,
    plans: &[CompanionPlan],
    config: &GeneratorConfig,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    descriptor.hash(&mut hasher);
    plans.hash(&mut hasher);
    config.hash(&mut hasher);
    hasher.finish()
}

/// Maps an unresolved link that slipped past analysis onto its diagnostic.
fn synthesis_diagnostic(
    error: &CodegenError,
    descriptor: &DeclarationDescriptor,
) -> Option<Diagnostic> {
    let CodegenError::Unresolved { declaration, target } = error else {
        return None;
    };
    let namespace = descriptor
        .links
        .iter()
        .find(|l| &l.target == target)
        .and_then(|l| l.namespace.clone());
    Some(Diagnostic::from(weft_analysis::AnalysisError::Resolution {
        declaration: declaration.clone(),
        target: target.clone(),
        namespace,
    }))
}
