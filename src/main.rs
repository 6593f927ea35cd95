//! Patterns - command-line runner for the design pattern demo catalog

use std::process::ExitCode;

use pattern_catalog::cli;

fn main() -> ExitCode {
    cli::run()
}
