//! One incremental generation pass.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use eqsynth_cache::{CacheEntry, GeneratedUnit, GenerationCache, TypeIdentity};
use eqsynth_common::InternalError;
use eqsynth_config::{ExecutionStrategy, GeneratorConfig};
use eqsynth_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use eqsynth_model::{CandidateDeclaration, DeclarationId, SymbolProvider};
use rayon::prelude::*;

use crate::cancel::CancellationToken;
use crate::descriptor::TypeDescriptor;
use crate::error::PassError;
use crate::marker::MarkerMatcher;
use crate::report::PassReport;

/// The result of a completed pass.
#[derive(Debug)]
pub struct PassOutput {
    /// One unit per marked type, ordered by output key.
    pub units: Vec<Arc<GeneratedUnit>>,
    /// The cache to hand to the next pass.
    pub cache: GenerationCache,
    /// What the pass did.
    pub report: PassReport,
    /// Warnings about skipped declarations, when reporting is enabled.
    pub diagnostics: Vec<Diagnostic>,
}

/// How one candidate resolved.
enum Resolution {
    Unmatched,
    Unresolved,
    Resolved(TypeDescriptor),
}

/// A descriptor paired with the unit generated for it.
struct Synthesized {
    descriptor: TypeDescriptor,
    unit: Arc<GeneratedUnit>,
    reused: bool,
}

/// Runs generation passes with a fixed configuration.
///
/// Both execution strategies call the same synthesizer and produce
/// byte-identical output; they differ only in how candidates are scheduled.
#[derive(Clone, Debug)]
pub struct Pipeline {
    marker_name: String,
    suffix: String,
    strategy: ExecutionStrategy,
    report_dropped: bool,
}

impl Pipeline {
    /// Creates a pipeline from the generator configuration.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            marker_name: config.marker.qualified_name.clone(),
            suffix: config.output.suffix.clone(),
            strategy: config.pipeline.strategy,
            report_dropped: config.pipeline.report_dropped,
        }
    }

    /// Overrides the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables warnings for skipped declarations.
    pub fn with_report_dropped(mut self, report_dropped: bool) -> Self {
        self.report_dropped = report_dropped;
        self
    }

    /// The execution strategy in use.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Runs one pass over the provider's current declarations.
    ///
    /// `previous` is only read. On success the returned cache replaces it;
    /// on cancellation or failure nothing is returned and `previous` remains
    /// the cache of record.
    pub fn run<P>(
        &self,
        provider: &P,
        previous: &GenerationCache,
        cancel: &CancellationToken,
    ) -> Result<PassOutput, PassError>
    where
        P: SymbolProvider + ?Sized,
    {
        let matcher = MarkerMatcher::resolve(provider.interner(), &self.marker_name);
        let diagnostics = DiagnosticSink::new();
        let mut report = PassReport::default();

        let mut candidates = provider.candidates();
        candidates.sort_by_key(|c| c.id);
        report.candidates = candidates.len();

        let resolutions = self.schedule(&candidates, cancel, |candidate| {
            self.resolve(provider, &matcher, candidate, &diagnostics)
        })?;
        let descriptors = collapse(&candidates, resolutions, &mut report);
        let descriptors = self.claim_output_keys(descriptors, &mut report, &diagnostics);

        let synthesized = self.schedule(&descriptors, cancel, |descriptor| {
            self.synthesize(descriptor, previous)
        })?;

        let mut cache = GenerationCache::new();
        let mut units = Vec::with_capacity(synthesized.len());
        for result in synthesized {
            let Synthesized {
                descriptor,
                unit,
                reused,
            } = result?;
            if reused {
                report.reused += 1;
            } else {
                report.synthesized += 1;
            }
            cache.insert(CacheEntry {
                identity: descriptor.identity().clone(),
                members: Arc::clone(descriptor.members()),
                key: descriptor.key(),
                unit: Arc::clone(&unit),
            })?;
            units.push(unit);
        }
        units.sort_by(|a, b| a.output_key.cmp(&b.output_key));

        report.evicted = previous
            .identities()
            .filter(|identity| !cache.contains(identity))
            .cloned()
            .collect();

        tracing::debug!(
            candidates = report.candidates,
            units = report.units(),
            reused = report.reused,
            synthesized = report.synthesized,
            evicted = report.evicted.len(),
            "generation pass complete"
        );

        Ok(PassOutput {
            units,
            cache,
            report,
            diagnostics: diagnostics.take_all(),
        })
    }

    /// Applies `f` to every item under the configured strategy, checking for
    /// cancellation before each item. Results keep the order of `items`.
    fn schedule<T, R, F>(
        &self,
        items: &[T],
        cancel: &CancellationToken,
        f: F,
    ) -> Result<Vec<R>, PassError>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let step = |item: &T| -> Result<R, PassError> {
            cancel.check()?;
            Ok(f(item))
        };
        match self.strategy {
            ExecutionStrategy::Sequential => items.iter().map(step).collect(),
            ExecutionStrategy::Parallel => items.par_iter().map(step).collect(),
        }
    }

    fn resolve<P>(
        &self,
        provider: &P,
        matcher: &MarkerMatcher,
        candidate: &CandidateDeclaration,
        diagnostics: &DiagnosticSink,
    ) -> Resolution
    where
        P: SymbolProvider + ?Sized,
    {
        if !matcher.matches(provider, &candidate.annotations) {
            return Resolution::Unmatched;
        }
        match provider.resolve_type(candidate.id) {
            Some(ty) => Resolution::Resolved(TypeDescriptor::from_resolved(&ty)),
            None => {
                tracing::debug!(id = %candidate.id, name = %candidate.name, "skipping unresolved candidate");
                if self.report_dropped {
                    let mut diag = Diagnostic::new(
                        DiagnosticCode::UnresolvedCandidate,
                        format!(
                            "skipped `{}`: member information could not be resolved",
                            candidate.name
                        ),
                    )
                    .with_note("no equality members were generated for this type");
                    if let Some(origin) = &candidate.origin {
                        diag = diag.with_origin(origin.as_str());
                    }
                    diagnostics.emit(diag);
                }
                Resolution::Unresolved
            }
        }
    }

    /// Keeps the first type, in identity order, for every output key.
    fn claim_output_keys(
        &self,
        descriptors: Vec<TypeDescriptor>,
        report: &mut PassReport,
        diagnostics: &DiagnosticSink,
    ) -> Vec<TypeDescriptor> {
        let mut claimed: BTreeMap<String, TypeIdentity> = BTreeMap::new();
        let mut kept = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let output_key = GeneratedUnit::output_key(&descriptor.identity().name, &self.suffix);
            match claimed.entry(output_key) {
                Entry::Vacant(slot) => {
                    slot.insert(descriptor.identity().clone());
                    kept.push(descriptor);
                }
                Entry::Occupied(slot) => {
                    tracing::debug!(
                        identity = %descriptor.identity(),
                        holder = %slot.get(),
                        "skipping type with conflicting output key"
                    );
                    if self.report_dropped {
                        diagnostics.emit(
                            Diagnostic::new(
                                DiagnosticCode::OutputKeyConflict,
                                format!(
                                    "skipped `{}`: output `{}` is already generated for `{}`",
                                    descriptor.identity(),
                                    slot.key(),
                                    slot.get()
                                ),
                            )
                            .with_help("rename one of the types"),
                        );
                    }
                    report.conflicts.push(descriptor.identity().clone());
                }
            }
        }
        kept
    }

    fn synthesize(
        &self,
        descriptor: &TypeDescriptor,
        previous: &GenerationCache,
    ) -> Result<Synthesized, InternalError> {
        let identity = descriptor.identity();
        let output_key = GeneratedUnit::output_key(&identity.name, &self.suffix);
        if let Some(hit) = previous.lookup(descriptor.key()) {
            if hit.identity != *identity {
                return Err(InternalError::new(format!(
                    "structural key {} derived for both `{}` and `{}`",
                    descriptor.key(),
                    hit.identity,
                    identity
                )));
            }
            // A unit generated under another suffix is stale.
            if hit.unit.output_key == output_key {
                tracing::trace!(identity = %identity, "reusing cached unit");
                return Ok(Synthesized {
                    descriptor: descriptor.clone(),
                    unit: Arc::clone(&hit.unit),
                    reused: true,
                });
            }
        }

        tracing::trace!(identity = %identity, "synthesizing unit");
        let text = eqsynth_codegen::synthesize(
            &identity.namespace,
            &identity.name,
            &descriptor.members()[..],
        );
        Ok(Synthesized {
            descriptor: descriptor.clone(),
            unit: Arc::new(GeneratedUnit::new(&identity.name, &self.suffix, text)),
            reused: false,
        })
    }
}

/// Deduplicates resolved candidates by type identity.
///
/// `candidates` and `resolutions` are parallel and sorted by declaration id,
/// so the surviving descriptor for each identity does not depend on the
/// order the provider reported candidates in. The result is in identity
/// order.
fn collapse(
    candidates: &[CandidateDeclaration],
    resolutions: Vec<Resolution>,
    report: &mut PassReport,
) -> Vec<TypeDescriptor> {
    let mut by_identity: BTreeMap<TypeIdentity, (DeclarationId, TypeDescriptor)> = BTreeMap::new();
    for (candidate, resolution) in candidates.iter().zip(resolutions) {
        match resolution {
            Resolution::Unmatched => report.unmatched += 1,
            Resolution::Unresolved => report.unresolved.push(candidate.id),
            Resolution::Resolved(descriptor) => match by_identity.entry(descriptor.identity().clone()) {
                Entry::Vacant(slot) => {
                    slot.insert((candidate.id, descriptor));
                }
                Entry::Occupied(slot) => {
                    let (first, kept) = slot.get();
                    if kept.key() != descriptor.key() {
                        tracing::debug!(
                            identity = %descriptor.identity(),
                            first = %first,
                            other = %candidate.id,
                            "partial declarations disagree on members; keeping the first"
                        );
                    }
                    report.duplicates += 1;
                }
            },
        }
    }
    by_identity.into_values().map(|(_, d)| d).collect()
}
