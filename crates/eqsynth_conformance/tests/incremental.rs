//! Cache behavior across consecutive passes.

use std::sync::Arc;

use std::sync::atomic::{AtomicUsize, Ordering};

use eqsynth_cache::{CacheStore, GenerationCache, TypeIdentity};
use eqsynth_common::{Ident, Interner};
use eqsynth_config::{ExecutionStrategy, GeneratorConfig};
use eqsynth_conformance::{
    declaration, make_config, model_json, model_provider, run_pass, run_pass_with, value_object,
};
use eqsynth_diagnostics::DiagnosticCode;
use eqsynth_model::{
    AnnotationRef, CandidateDeclaration, DeclarationId, ModelProvider, ResolvedType,
    SymbolProvider,
};
use eqsynth_pipeline::{CancellationToken, PassError, Pipeline};
use serde_json::Value;

/// Cancels the pass after a fixed number of type resolutions.
struct CancelAfter {
    inner: ModelProvider,
    token: CancellationToken,
    remaining: AtomicUsize,
}

impl SymbolProvider for CancelAfter {
    fn interner(&self) -> &Interner {
        self.inner.interner()
    }

    fn candidates(&self) -> Vec<CandidateDeclaration> {
        self.inner.candidates()
    }

    fn resolve_annotation(&self, annotation: &AnnotationRef) -> Option<Ident> {
        self.inner.resolve_annotation(annotation)
    }

    fn resolve_type(&self, id: DeclarationId) -> Option<ResolvedType> {
        if self.remaining.fetch_sub(1, Ordering::SeqCst) <= 1 {
            self.token.cancel();
        }
        self.inner.resolve_type(id)
    }
}

fn three_types() -> String {
    model_json(vec![
        value_object("Demo", "Foo", &["X", "Y"]),
        value_object("Demo", "Bar", &["A"]),
        value_object("Demo", "Empty", &[]),
    ])
}

// ---------------------------------------------------------------------------
// Reuse
// ---------------------------------------------------------------------------

#[test]
fn unchanged_input_is_fully_reused() {
    let model = three_types();
    let first = run_pass(&model, &GenerationCache::new());
    assert_eq!(first.report.synthesized, 3);

    let second = run_pass(&model, &first.cache);
    assert_eq!(second.report.reused, 3);
    assert_eq!(second.report.synthesized, 0);
    assert_eq!(first.units, second.units);
    for (a, b) in first.units.iter().zip(&second.units) {
        assert!(Arc::ptr_eq(a, b), "{} was synthesized again", a.output_key);
    }
}

#[test]
fn only_changed_type_is_resynthesized() {
    let first = run_pass(&three_types(), &GenerationCache::new());
    let changed = model_json(vec![
        value_object("Demo", "Foo", &["X", "Y", "Z"]),
        value_object("Demo", "Bar", &["A"]),
        value_object("Demo", "Empty", &[]),
    ]);
    let second = run_pass(&changed, &first.cache);

    assert_eq!(second.report.synthesized, 1);
    assert_eq!(second.report.reused, 2);
    assert!(second
        .text("Foo_ValueObject")
        .unwrap()
        .contains("HashCode.Combine(X, Y, Z)"));
    assert_ne!(
        first.cache.get(&TypeIdentity::new("Demo", "Foo")).unwrap().key,
        second.cache.get(&TypeIdentity::new("Demo", "Foo")).unwrap().key
    );
}

#[test]
fn reordered_members_change_the_key() {
    let first = run_pass(
        &model_json(vec![value_object("Demo", "Foo", &["X", "Y"])]),
        &GenerationCache::new(),
    );
    let second = run_pass(
        &model_json(vec![value_object("Demo", "Foo", &["Y", "X"])]),
        &first.cache,
    );
    assert_eq!(second.report.synthesized, 1);
    assert!(second
        .text("Foo_ValueObject")
        .unwrap()
        .contains("Equals(Y, other.Y) && Equals(X, other.X)"));
}

#[test]
fn adding_static_member_keeps_cache_hit() {
    let first = run_pass(
        &model_json(vec![value_object("Demo", "Baz", &["A"])]),
        &GenerationCache::new(),
    );
    let members: Value = serde_json::from_str(
        r#"[
            { "name": "A", "kind": "property" },
            { "name": "Default", "kind": "property", "is_static": true }
        ]"#,
    )
    .unwrap();
    let second = run_pass(
        &model_json(vec![declaration("Demo", "Baz", &["ValueObject"], members)]),
        &first.cache,
    );
    assert_eq!(second.report.reused, 1);
}

// ---------------------------------------------------------------------------
// Eviction
// ---------------------------------------------------------------------------

#[test]
fn removed_type_is_evicted() {
    let first = run_pass(&three_types(), &GenerationCache::new());
    let fewer = model_json(vec![
        value_object("Demo", "Foo", &["X", "Y"]),
        value_object("Demo", "Empty", &[]),
    ]);
    let second = run_pass(&fewer, &first.cache);

    assert_eq!(second.keys(), vec!["Empty_ValueObject", "Foo_ValueObject"]);
    assert_eq!(second.report.evicted, vec![TypeIdentity::new("Demo", "Bar")]);
    assert!(!second.cache.contains(&TypeIdentity::new("Demo", "Bar")));
    // The previous cache is left as it was.
    assert!(first.cache.contains(&TypeIdentity::new("Demo", "Bar")));
}

#[test]
fn unmarking_a_type_evicts_it() {
    let first = run_pass(&three_types(), &GenerationCache::new());
    let unmarked = model_json(vec![
        value_object("Demo", "Foo", &["X", "Y"]),
        declaration("Demo", "Bar", &["Serializable"], serde_json::json!([])),
        value_object("Demo", "Empty", &[]),
    ]);
    let second = run_pass(&unmarked, &first.cache);
    assert_eq!(second.report.unmatched, 1);
    assert_eq!(second.report.evicted, vec![TypeIdentity::new("Demo", "Bar")]);
}

// ---------------------------------------------------------------------------
// Dropped candidates
// ---------------------------------------------------------------------------

#[test]
fn unresolved_candidate_is_silent_by_default() {
    let model = model_json(vec![
        declaration("Demo", "Broken", &["ValueObject"], Value::Null),
        value_object("Demo", "Foo", &["X"]),
    ]);
    let result = run_pass(&model, &GenerationCache::new());
    assert_eq!(result.keys(), vec!["Foo_ValueObject"]);
    assert_eq!(result.report.unresolved.len(), 1);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn unresolved_candidate_warns_when_enabled() {
    let config = make_config("[pipeline]\nreport_dropped = true\n");
    let model = model_json(vec![declaration("Demo", "Broken", &["ValueObject"], Value::Null)]);
    let result = run_pass_with(
        &model,
        &config,
        &GenerationCache::new(),
        ExecutionStrategy::Parallel,
    );
    assert!(result.units.is_empty());
    assert_eq!(result.count(DiagnosticCode::UnresolvedCandidate), 1);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::UnresolvedCandidate);
}

#[test]
fn conflicting_output_keys_keep_one_unit() {
    let config = make_config("[pipeline]\nreport_dropped = true\n");
    let model = model_json(vec![
        value_object("Orders", "Id", &["Value"]),
        value_object("Customers", "Id", &["Value"]),
    ]);
    let result = run_pass_with(
        &model,
        &config,
        &GenerationCache::new(),
        ExecutionStrategy::Sequential,
    );
    assert_eq!(result.keys(), vec!["Id_ValueObject"]);
    assert!(result.text("Id_ValueObject").unwrap().contains("namespace Customers"));
    assert_eq!(result.report.conflicts, vec![TypeIdentity::new("Orders", "Id")]);
    assert_eq!(result.diagnostics[0].code, DiagnosticCode::OutputKeyConflict);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[test]
fn cancelled_pass_leaves_previous_cache_intact() {
    let config = GeneratorConfig::default();
    let first = run_pass(&three_types(), &GenerationCache::new());

    let changed = model_json(vec![value_object("Demo", "Foo", &["Z"])]);
    let provider = model_provider(&changed, &config);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = Pipeline::new(&config)
        .run(&provider, &first.cache, &cancel)
        .unwrap_err();
    assert!(matches!(err, PassError::Cancelled));
    assert_eq!(first.cache.len(), 3);

    // The next uncancelled pass still reuses the untouched entries.
    let rerun = run_pass(&three_types(), &first.cache);
    assert_eq!(rerun.report.reused, 3);
}

#[test]
fn cancellation_during_resolution_aborts_both_strategies() {
    let config = GeneratorConfig::default();
    let names: Vec<String> = (0..64).map(|i| format!("Type{i:02}")).collect();
    let model = model_json(
        names
            .iter()
            .map(|n| value_object("Demo", n, &["A"]))
            .collect(),
    );
    let first = run_pass(&model, &GenerationCache::new());
    assert_eq!(first.units.len(), 64);

    let changed = model_json(
        names
            .iter()
            .map(|n| value_object("Demo", n, &["A", "B"]))
            .collect(),
    );
    for strategy in [ExecutionStrategy::Sequential, ExecutionStrategy::Parallel] {
        let token = CancellationToken::new();
        let provider = CancelAfter {
            inner: model_provider(&changed, &config),
            token: token.clone(),
            remaining: AtomicUsize::new(3),
        };
        let err = Pipeline::new(&config)
            .with_strategy(strategy)
            .run(&provider, &first.cache, &token)
            .unwrap_err();
        assert!(matches!(err, PassError::Cancelled), "{strategy:?}");
    }

    let rerun = run_pass(&model, &first.cache);
    assert_eq!(rerun.report.reused, 64);
    assert_eq!(rerun.report.synthesized, 0);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn persisted_cache_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheStore::new(dir.path(), "1.0.0", "_ValueObject");
    let first = run_pass(&three_types(), &store.load());
    store.save(&first.cache).unwrap();

    let reloaded = store.load();
    assert_eq!(reloaded.len(), 3);
    let second = run_pass(&three_types(), &reloaded);
    assert_eq!(second.report.reused, 3);
    assert_eq!(first.units, second.units);
}

#[test]
fn persisted_cache_from_other_version_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let first = run_pass(&three_types(), &GenerationCache::new());
    CacheStore::new(dir.path(), "1.0.0", "_ValueObject")
        .save(&first.cache)
        .unwrap();

    let other = CacheStore::new(dir.path(), "2.0.0", "_ValueObject").load();
    assert!(other.is_empty());
    let renamed = CacheStore::new(dir.path(), "1.0.0", "_Equality").load();
    assert!(renamed.is_empty());
}

#[test]
fn corrupt_manifest_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("manifest.json"), "{ not json").unwrap();
    let store = CacheStore::new(dir.path(), "1.0.0", "_ValueObject");
    assert!(store.load().is_empty());
}
