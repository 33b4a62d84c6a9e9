//! Conformance test helpers for the eqsynth generation pipeline.
//!
//! Provides shared functions that build symbol models, run them through a
//! generation pass, and return structured results for assertion in
//! integration tests.

#![warn(missing_docs)]

use std::sync::Arc;

use eqsynth_cache::{GeneratedUnit, GenerationCache};
use eqsynth_config::{ExecutionStrategy, GeneratorConfig};
use eqsynth_diagnostics::{Diagnostic, DiagnosticCode};
use eqsynth_model::{ModelProvider, SymbolProvider};
use eqsynth_pipeline::{CancellationToken, PassReport, Pipeline};
use serde_json::{json, Value};

/// Qualified name of the default marker annotation.
pub const MARKER: &str = "RoodFluweel.ValueObjects.ValueObjectAttribute";

/// Result of running one generation pass.
pub struct PassResult {
    /// Units in output-key order.
    pub units: Vec<Arc<GeneratedUnit>>,
    /// The cache produced by the pass.
    pub cache: GenerationCache,
    /// What the pass did.
    pub report: PassReport,
    /// Diagnostics emitted during the pass.
    pub diagnostics: Vec<Diagnostic>,
}

impl PassResult {
    /// Output keys of every unit, in order.
    pub fn keys(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.output_key.as_str()).collect()
    }

    /// Text of the unit with `output_key`.
    pub fn text(&self, output_key: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|u| u.output_key == output_key)
            .map(|u| u.text.as_str())
    }

    /// Number of diagnostics carrying `code`.
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }
}

/// Creates a `GeneratorConfig` from TOML text.
pub fn make_config(toml_str: &str) -> GeneratorConfig {
    toml::from_str(toml_str).unwrap()
}

/// A declaration annotated `[ValueObject]` with the given instance properties.
pub fn value_object(namespace: &str, name: &str, properties: &[&str]) -> Value {
    let members: Vec<Value> = properties
        .iter()
        .map(|p| json!({ "name": p, "kind": "property" }))
        .collect();
    json!({
        "origin": format!("src/{name}.cs"),
        "namespace": namespace,
        "name": name,
        "annotations": [{ "name": "ValueObject" }],
        "members": members,
    })
}

/// A declaration carrying the given annotations and raw member objects.
pub fn declaration(namespace: &str, name: &str, annotations: &[&str], members: Value) -> Value {
    let annotations: Vec<Value> = annotations.iter().map(|a| json!({ "name": a })).collect();
    json!({
        "namespace": namespace,
        "name": name,
        "annotations": annotations,
        "members": members,
    })
}

/// Serializes declarations into a symbol model document.
pub fn model_json(declarations: Vec<Value>) -> String {
    json!({ "declarations": declarations }).to_string()
}

/// Parses a model and brings the configured marker annotation into scope.
pub fn model_provider(model: &str, config: &GeneratorConfig) -> ModelProvider {
    let mut provider = ModelProvider::from_json(model).unwrap();
    provider.register_annotation(&config.marker.qualified_name);
    provider
}

/// Runs a sequential pass over `model` with the default configuration.
pub fn run_pass(model: &str, previous: &GenerationCache) -> PassResult {
    run_pass_with(
        model,
        &GeneratorConfig::default(),
        previous,
        ExecutionStrategy::Sequential,
    )
}

/// Runs a pass over `model` with an explicit configuration and strategy.
pub fn run_pass_with(
    model: &str,
    config: &GeneratorConfig,
    previous: &GenerationCache,
    strategy: ExecutionStrategy,
) -> PassResult {
    let provider = model_provider(model, config);
    run_provider(&provider, config, previous, strategy)
}

/// Runs a pass over an arbitrary symbol provider.
pub fn run_provider<P>(
    provider: &P,
    config: &GeneratorConfig,
    previous: &GenerationCache,
    strategy: ExecutionStrategy,
) -> PassResult
where
    P: SymbolProvider + ?Sized,
{
    let output = Pipeline::new(config)
        .with_strategy(strategy)
        .run(provider, previous, &CancellationToken::new())
        .unwrap();
    PassResult {
        units: output.units,
        cache: output.cache,
        report: output.report,
        diagnostics: output.diagnostics,
    }
}
