//! Output sinks for demo text
//!
//! Demos never print directly. Every logical line goes through an
//! [`OutputSink`] so the runner can capture it, and tests can inspect it.

/// Destination for the lines a demo emits.
pub trait OutputSink {
    /// Append one logical line of output.
    fn emit(&mut self, line: String);
}

impl OutputSink for Vec<String> {
    fn emit(&mut self, line: String) {
        self.push(line);
    }
}

/// Prints each line to standard output as it arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, line: String) {
        println!("{}", line);
    }
}

/// Line buffer used by the runner to capture a demo's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    lines: Vec<String>,
}

impl CapturedOutput {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Captured lines in emission order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume the buffer, returning the captured lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for CapturedOutput {
    fn emit(&mut self, line: String) {
        self.lines.push(line);
    }
}
