//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod list;
mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::config::{self, CliOverrides, ConfigSource, OutputFormat, PatternsConfig};
use crate::patterns::builtin_registry;
use crate::output::StdoutSink;
use crate::registry::DemoRegistry;
use crate::runner::progress::{ConsoleProgress, JsonProgress, ProgressReporter};
use crate::runner::Runner;
use crate::telemetry::ErrorCollector;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
/// Unknown demo name, bad configuration, or startup failure
pub(crate) const EXIT_ERROR: u8 = 1;
/// `run`: the demo itself failed
pub(crate) const EXIT_DEMO_FAILED: u8 = 2;
/// `run-all`: at least one demo failed
pub(crate) const EXIT_BATCH_FAILED: u8 = 3;

/// Patterns - run the design pattern demo catalog
#[derive(Parser)]
#[command(name = "patterns")]
#[command(about = "Patterns - list and run classic design pattern demos")]
#[command(version)]
pub struct Cli {
    /// Path to a patterns.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Progress format on stderr: console or json
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored progress output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Report every demo, not just failures
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append failures to the telemetry error log
    #[arg(long, global = true)]
    pub collect_errors: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered demo names
    List {
        /// Show each demo's description
        #[arg(short, long)]
        long: bool,
    },

    /// Run one demo by name
    Run {
        /// Demo name (see `patterns list`)
        name: String,
    },

    /// Run every demo in registry order
    #[command(name = "run-all")]
    RunAll,
}

impl Cli {
    /// Overrides implied by the global flags. Absent flags leave the file alone.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            color: self.no_color.then_some(false),
            verbose: self.verbose.then_some(true),
            collect_errors: self.collect_errors.then_some(true),
        }
    }
}

/// Everything a command needs, built once from config and flags.
pub(crate) struct Context {
    pub config: PatternsConfig,
    pub source: ConfigSource,
    pub registry: DemoRegistry,
    pub runner: Runner,
    pub collector: ErrorCollector,
}

impl Context {
    fn build(cli: &Cli) -> Result<Self, u8> {
        let source = ConfigSource::locate(cli.config.as_deref());
        let mut config = load_settings(&source)?;
        config::merge_cli_overrides(&mut config, &cli.overrides());

        let registry = match builtin_registry() {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Err(EXIT_ERROR);
            }
        };

        let runner = Runner::new().with_reporter(reporter_for(&config));
        let collector =
            ErrorCollector::new(&config.telemetry.error_log, config.telemetry.collect_errors);

        Ok(Self { config, source, registry, runner, collector })
    }
}

/// Load the configuration for `source`.
///
/// A broken file named with `--config` is fatal. A discovered one only
/// warns, so files the user did not ask for never change exit codes.
fn load_settings(source: &ConfigSource) -> Result<PatternsConfig, u8> {
    match config::load_from_source(source) {
        Ok(config) => Ok(config),
        Err(e) if source.is_explicit() => {
            eprintln!("Error: {}", e);
            Err(EXIT_ERROR)
        }
        Err(e) => {
            if let Some(path) = source.path() {
                eprintln!("Warning: ignoring {}: {}", path.display(), e);
            }
            Ok(config::default_config())
        }
    }
}

/// Progress reporter selected by the output settings.
pub(crate) fn reporter_for(config: &PatternsConfig) -> Arc<dyn ProgressReporter> {
    match config.output.format {
        OutputFormat::Json => Arc::new(JsonProgress::new()),
        OutputFormat::Console => {
            let use_colors = config.output.color && atty::is(atty::Stream::Stderr);
            Arc::new(
                ConsoleProgress::new()
                    .with_colors(use_colors)
                    .with_verbose(config.output.verbose),
            )
        }
    }
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let context = match Context::build(&cli) {
        Ok(context) => context,
        Err(code) => return ExitCode::from(code),
    };

    let mut out = StdoutSink;
    let code = match &cli.command {
        Commands::List { long } => list::run_list(&context.registry, *long, &mut out),
        Commands::Run { name } => run::run_one(&context, name, &mut out),
        Commands::RunAll => run::run_all(&context, &mut out),
    };
    ExitCode::from(code)
}
