//! `run` and `run-all` commands

use crate::config::OutputConfig;
use crate::output::OutputSink;
use crate::registry::RegistryError;
use crate::runner::{BatchSummary, RunResult};
use crate::suggest::did_you_mean;
use crate::telemetry::ErrorEntry;

use super::{Context, EXIT_BATCH_FAILED, EXIT_DEMO_FAILED, EXIT_ERROR, EXIT_SUCCESS};

const RUN: &str = "run";
const RUN_ALL: &str = "run-all";

/// Run a single demo and print its output.
pub(crate) fn run_one(context: &Context, name: &str, out: &mut dyn OutputSink) -> u8 {
    match context.runner.run_one(name, &context.registry) {
        Ok(result) => {
            for line in &result.output_lines {
                out.emit(line.clone());
            }
            if let Some(entry) = ErrorEntry::from_run_result(RUN, &result) {
                context.collector.record(&entry);
            }
            match result.error_message() {
                None => EXIT_SUCCESS,
                Some(message) => {
                    eprintln!("Error: Demo '{}' failed: {}", result.demo_name, message);
                    EXIT_DEMO_FAILED
                }
            }
        }
        Err(e) => {
            report_registry_error(&e);
            context.collector.record(&ErrorEntry::from_registry_error(RUN, &e));
            EXIT_ERROR
        }
    }
}

/// Run every selected demo, streaming each block as it finishes.
///
/// Unknown names in `include`/`exclude` are fatal only when the config was
/// passed with `--config`; a discovered config falls back to the full catalog.
pub(crate) fn run_all(context: &Context, out: &mut dyn OutputSink) -> u8 {
    let run = &context.config.run;
    let selected = match context.registry.select(&run.include, &run.exclude) {
        Ok(selected) => selected,
        Err(e) if context.source.is_explicit() => {
            report_registry_error(&e);
            context.collector.record(&ErrorEntry::from_registry_error(RUN_ALL, &e));
            return EXIT_ERROR;
        }
        Err(e) => {
            eprintln!("Warning: ignoring run selection: {}", e);
            context.registry.clone()
        }
    };

    let summary = context.runner.run_batch_with(&selected, |result| {
        for line in result_block(&context.config.output, result) {
            out.emit(line);
        }
        if let Some(entry) = ErrorEntry::from_run_result(RUN_ALL, result) {
            context.collector.record(&entry);
        }
    });

    out.emit(summary.summary());
    batch_exit_code(&summary)
}

/// Header, then output lines, then a `FAILED:` line if the demo failed.
pub(crate) fn result_block(output: &OutputConfig, result: &RunResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.output_lines.len() + 2);
    lines.push(output.header_for(&result.demo_name));
    lines.extend(result.output_lines.iter().cloned());
    if let Some(message) = result.error_message() {
        lines.push(format!("FAILED: {}", message));
    }
    lines
}

pub(crate) fn batch_exit_code(summary: &BatchSummary) -> u8 {
    if summary.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_BATCH_FAILED
    }
}

fn report_registry_error(err: &RegistryError) {
    eprintln!("Error: {}", err);
    if let RegistryError::NotFound { suggestions, .. } = err {
        if let Some(hint) = did_you_mean(suggestions) {
            eprintln!("{}", hint);
        }
    }
}
