//! eqsynth CLI: generates structural-equality members for `[ValueObject]` types.
//!
//! Provides `eqsynth generate` to run a generation pass over a symbol model
//! and write the resulting units, `eqsynth inspect` to list what a pass
//! would generate, and `eqsynth clean` to drop the persisted cache.

#![warn(missing_docs)]

mod clean;
mod generate;
mod inspect;
mod project;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use eqsynth_config::ExecutionStrategy;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "EQSYNTH_LOG";

/// eqsynth: value-object equality generator.
#[derive(Parser, Debug)]
#[command(name = "eqsynth", version, about = "Value-object equality generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `eqsynth.toml`, or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a generation pass and write the generated files.
    Generate(GenerateArgs),
    /// List the types a generation pass would produce code for.
    Inspect(InspectArgs),
    /// Remove the persisted generation cache.
    Clean,
}

/// Arguments for the `eqsynth generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Symbol model (JSON) describing the declarations to process.
    #[arg(short, long)]
    pub model: String,

    /// Output directory, overriding `output.directory`.
    #[arg(short, long)]
    pub out: Option<String>,

    /// Execution strategy, overriding `pipeline.strategy`.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Ignore the persisted cache and do not update it.
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `eqsynth inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Symbol model (JSON) describing the declarations to process.
    #[arg(short, long)]
    pub model: String,
}

/// Execution strategy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// One candidate at a time on the calling thread.
    Sequential,
    /// Candidates spread over the rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => ExecutionStrategy::Sequential,
            StrategyArg::Parallel => ExecutionStrategy::Parallel,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
        Command::Clean => clean::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `EQSYNTH_LOG` takes precedence over
/// the level implied by `-q`/`-v`.
fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}
