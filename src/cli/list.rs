//! `list` command

use crate::output::OutputSink;
use crate::registry::DemoRegistry;

use super::EXIT_SUCCESS;

/// Lines printed by `list`.
pub(crate) fn list_lines(registry: &DemoRegistry, long: bool) -> Vec<String> {
    registry
        .iter()
        .map(|demo| {
            if long {
                format!("{} - {}", demo.name(), demo.description())
            } else {
                demo.name().to_string()
            }
        })
        .collect()
}

pub(crate) fn run_list(registry: &DemoRegistry, long: bool, out: &mut dyn OutputSink) -> u8 {
    for line in list_lines(registry, long) {
        out.emit(line);
    }
    EXIT_SUCCESS
}
