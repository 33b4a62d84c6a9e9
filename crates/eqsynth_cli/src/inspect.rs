//! `eqsynth inspect`: list the types a pass would generate code for.

use eqsynth_cache::GenerationCache;
use eqsynth_diagnostics::{DiagnosticRenderer, TerminalRenderer};
use eqsynth_pipeline::{CancellationToken, ExecutionStrategy, PassOutput, Pipeline};

use crate::project::Project;
use crate::{GlobalArgs, InspectArgs};

/// Runs the `eqsynth inspect` command.
///
/// Runs an uncached sequential pass with dropped-candidate reporting
/// enabled and prints one line per generated type. Nothing is written.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::open(global)?;
    let provider = project.load_model(&args.model)?;

    let output = Pipeline::new(&project.config)
        .with_strategy(ExecutionStrategy::Sequential)
        .with_report_dropped(true)
        .run(&provider, &GenerationCache::new(), &CancellationToken::new())?;

    let renderer = TerminalRenderer::new(global.color);
    for diag in &output.diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
    for line in describe(&output) {
        println!("{line}");
    }
    Ok(0)
}

/// One line per generated type, in output-key order.
fn describe(output: &PassOutput) -> Vec<String> {
    let mut entries: Vec<_> = output.cache.entries().collect();
    entries.sort_by(|a, b| a.unit.output_key.cmp(&b.unit.output_key));
    entries
        .into_iter()
        .map(|entry| {
            format!(
                "{} -> {} [{}] {}",
                entry.identity,
                entry.unit.output_key,
                entry.members.join(", "),
                entry.key
            )
        })
        .collect()
}
