//! The incremental equality-synthesis pipeline.
//!
//! A pass takes the annotated declarations a [`SymbolProvider`] reports,
//! keeps those carrying the marker annotation, extracts each type's instance
//! members, collapses partial declarations of the same type, and synthesizes
//! one [`GeneratedUnit`] per type. Units whose [`StructuralKey`] is unchanged
//! since the previous pass are taken from the previous [`GenerationCache`]
//! without running the synthesizer.
//!
//! [`SymbolProvider`]: eqsynth_model::SymbolProvider
//! [`GeneratedUnit`]: eqsynth_cache::GeneratedUnit
//! [`StructuralKey`]: eqsynth_cache::StructuralKey
//! [`GenerationCache`]: eqsynth_cache::GenerationCache

#![warn(missing_docs)]

pub mod cancel;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod marker;
pub mod pipeline;
pub mod report;
pub mod sink;

pub use cancel::CancellationToken;
pub use descriptor::TypeDescriptor;
pub use eqsynth_config::ExecutionStrategy;
pub use error::PassError;
pub use extract::extract_members;
pub use marker::{MarkerId, MarkerMatcher};
pub use pipeline::{PassOutput, Pipeline};
pub use report::PassReport;
pub use sink::{emit_all, DirectorySink, EmitSummary, MemorySink, OutputSink, SinkError, SinkOutcome};
