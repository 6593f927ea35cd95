//! Local failure telemetry
//!
//! Appends failed demo runs and unknown-name lookups to a JSONL file so
//! recurring failures can be inspected later. Nothing leaves the machine.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::registry::RegistryError;
use crate::runner::RunResult;
use crate::suggest::did_you_mean;

/// Error type recorded for a demo whose `run` failed.
pub const DEMO_FAILED: &str = "demo_failed";
/// Error type recorded for a lookup of an unregistered name.
pub const NOT_FOUND: &str = "not_found";
/// Error type recorded for a duplicate registration.
pub const DUPLICATE_NAME: &str = "duplicate_name";

/// One line of the failure log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`
    pub timestamp: String,
    /// CLI command that was running (`run`, `run-all`)
    pub command: String,
    /// Demo involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    /// Failure category, e.g. [`DEMO_FAILED`]
    pub error_type: String,
    /// Failure message
    pub message: String,
    /// Suggested fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorEntry {
    /// Create a new entry stamped with the current time
    pub fn new(
        command: impl Into<String>,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: utc_timestamp(SystemTime::now()),
            command: command.into(),
            demo: None,
            error_type: error_type.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_demo(mut self, demo: impl Into<String>) -> Self {
        self.demo = Some(demo.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Entry for a failed run. `None` when the run succeeded.
    pub fn from_run_result(command: &str, result: &RunResult) -> Option<Self> {
        let message = result.error_message()?;
        Some(Self::new(command, DEMO_FAILED, message).with_demo(&result.demo_name))
    }

    /// Entry for a registry error, carrying any "did you mean" hint.
    pub fn from_registry_error(command: &str, err: &RegistryError) -> Self {
        match err {
            RegistryError::NotFound { name, suggestions } => {
                let entry = Self::new(command, NOT_FOUND, err.to_string()).with_demo(name);
                match did_you_mean(suggestions) {
                    Some(hint) => entry.with_suggestion(hint),
                    None => entry,
                }
            }
            other => Self::new(command, DUPLICATE_NAME, other.to_string()).with_demo(other.name()),
        }
    }
}

/// Format `time` as an ISO 8601 UTC timestamp with second precision.
pub fn utc_timestamp(time: SystemTime) -> String {
    let secs = time.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Appends [`ErrorEntry`] lines to a JSONL file
#[derive(Debug, Clone)]
pub struct ErrorCollector {
    path: PathBuf,
    enabled: bool,
}

impl ErrorCollector {
    pub fn new(path: impl AsRef<Path>, enabled: bool) -> Self {
        Self { path: path.as_ref().to_path_buf(), enabled }
    }

    /// A collector that never writes.
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the log and its directory on first use.
    pub fn log(&self, entry: &ErrorEntry) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        writeln!(writer, "{}", json)?;
        writer.flush()
    }

    /// Log and swallow I/O errors; telemetry must not change the outcome.
    pub fn record(&self, entry: &ErrorEntry) {
        let _ = self.log(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoError;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_error_entry_builders() {
        let entry = ErrorEntry::new("run", DEMO_FAILED, "boom")
            .with_demo("broken")
            .with_suggestion("check the demo");
        assert_eq!(entry.command, "run");
        assert_eq!(entry.demo.as_deref(), Some("broken"));
        assert_eq!(entry.suggestion.as_deref(), Some("check the demo"));
    }

    #[test]
    fn test_entry_from_run_result() {
        let ok = RunResult::succeeded("a".to_string(), vec![], Duration::ZERO);
        assert!(ErrorEntry::from_run_result("run-all", &ok).is_none());

        let bad =
            RunResult::failed("b".to_string(), vec![], DemoError::new("boom"), Duration::ZERO);
        let entry = ErrorEntry::from_run_result("run-all", &bad).unwrap();
        assert_eq!(entry.error_type, DEMO_FAILED);
        assert_eq!(entry.message, "boom");
        assert_eq!(entry.demo.as_deref(), Some("b"));
    }

    #[test]
    fn test_entry_from_not_found() {
        let err = RegistryError::NotFound {
            name: "adaptr".to_string(),
            suggestions: vec!["adapter".to_string()],
        };
        let entry = ErrorEntry::from_registry_error("run", &err);
        assert_eq!(entry.error_type, NOT_FOUND);
        assert_eq!(entry.message, "Unknown demo 'adaptr'");
        assert_eq!(entry.suggestion.as_deref(), Some("Did you mean 'adapter'?"));
    }

    #[test]
    fn test_collector_disabled_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("errors.jsonl");

        let collector = ErrorCollector::new(&path, false);
        collector.log(&ErrorEntry::new("run", DEMO_FAILED, "x")).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_collector_creates_directory_and_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".patterns").join("errors.jsonl");

        let collector = ErrorCollector::new(&path, true);
        collector.log(&ErrorEntry::new("run", DEMO_FAILED, "first").with_demo("a")).unwrap();
        collector.log(&ErrorEntry::new("run-all", NOT_FOUND, "second")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let entries: Vec<ErrorEntry> =
            contents.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].command, "run-all");
        assert!(!contents.lines().nth(1).unwrap().contains("\"demo\""));
    }

    #[test]
    fn test_utc_timestamp() {
        assert_eq!(utc_timestamp(UNIX_EPOCH), "1970-01-01T00:00:00Z");
        let leap_day = UNIX_EPOCH + Duration::from_secs(951_782_400 + 3_661);
        assert_eq!(utc_timestamp(leap_day), "2000-02-29T01:01:01Z");
        assert_eq!(utc_timestamp(SystemTime::now()).len(), 20);
    }
}
