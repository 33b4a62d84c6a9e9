//! `eqsynth generate`: one incremental generation pass.
//!
//! 1. Locate the project and load `eqsynth.toml`
//! 2. Load the symbol model with the marker annotation in scope
//! 3. Load the persisted cache (unless disabled)
//! 4. Run the pass and render any diagnostics
//! 5. Write the units, pruning generated files no longer produced
//! 6. Save the new cache

use eqsynth_cache::GenerationCache;
use eqsynth_diagnostics::{DiagnosticRenderer, TerminalRenderer};
use eqsynth_pipeline::{emit_all, CancellationToken, DirectorySink, Pipeline};

use crate::project::Project;
use crate::{GenerateArgs, GlobalArgs};

/// Runs the `eqsynth generate` command. Returns exit code 0 on success.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::open(global)?;
    let config = &project.config;
    let provider = project.load_model(&args.model)?;

    let use_cache = config.cache.enabled && !args.no_cache;
    let store = project.cache_store();
    let previous = if use_cache {
        store.load()
    } else {
        GenerationCache::new()
    };

    let mut pipeline = Pipeline::new(config);
    if let Some(strategy) = args.strategy {
        pipeline = pipeline.with_strategy(strategy.into());
    }
    let output = pipeline.run(&provider, &previous, &CancellationToken::new())?;

    if !global.quiet {
        let renderer = TerminalRenderer::new(global.color);
        for diag in &output.diagnostics {
            eprintln!("{}", renderer.render(diag));
        }
    }

    let out_dir = match &args.out {
        Some(dir) => project.resolve(dir),
        None => project.output_dir(),
    };
    let mut sink = DirectorySink::new(&out_dir, config.output.extension.as_str());
    let summary = emit_all(&mut sink, output.units.iter().map(|u| u.as_ref()))?;
    let removed = sink.prune(output.units.iter().map(|u| u.output_key.as_str()))?;

    if use_cache {
        store.save(&output.cache)?;
    }

    if !global.quiet {
        let report = &output.report;
        eprintln!(
            "   Generated {} type(s) ({} reused, {} synthesized) into {}",
            report.units(),
            report.reused,
            report.synthesized,
            out_dir.display()
        );
        eprintln!(
            "   {} written, {} unchanged, {} removed",
            summary.written, summary.unchanged, removed
        );
    }
    Ok(0)
}
