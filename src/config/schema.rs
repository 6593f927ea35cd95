//! Configuration schema types for `patterns.toml`
//!
//! Defines the structure and validation rules for the catalog's settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder that run-all headers must contain.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// How progress events are rendered on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, optionally colored
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected console or json)", other)),
        }
    }
}

/// Output section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Progress event format
    #[serde(default)]
    pub format: OutputFormat,
    /// Colorize console progress
    #[serde(default = "default_true")]
    pub color: bool,
    /// Report successful demos as well as failures
    #[serde(default)]
    pub verbose: bool,
    /// Template printed before each demo in run-all
    #[serde(default = "default_header")]
    pub header: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            verbose: false,
            header: default_header(),
        }
    }
}

impl OutputConfig {
    /// Render the run-all header for `name`.
    pub fn header_for(&self, name: &str) -> String {
        self.header.replace(NAME_PLACEHOLDER, name)
    }
}

fn default_true() -> bool {
    true
}

fn default_header() -> String {
    "== {name} ==".to_string()
}

/// Batch selection section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// If non-empty, run-all runs only these demos
    #[serde(default)]
    pub include: Vec<String>,
    /// Demos run-all skips
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Local error telemetry section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Append failures to the error log
    #[serde(default)]
    pub collect_errors: bool,
    /// JSONL file failures are appended to
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { collect_errors: false, error_log: default_error_log() }
    }
}

fn default_error_log() -> PathBuf {
    PathBuf::from(".patterns/errors.jsonl")
}

/// Complete patterns.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PatternsConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Batch selection
    #[serde(default)]
    pub run: RunConfig,
    /// Error telemetry
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.header")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "patterns.toml: '{}' {}", self.field, self.message)
    }
}

impl PatternsConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !self.output.header.contains(NAME_PLACEHOLDER) {
            errors.push(ConfigValidationError {
                field: "output.header".to_string(),
                message: format!("must contain {}", NAME_PLACEHOLDER),
            });
        }

        for (field, names) in [("run.include", &self.run.include), ("run.exclude", &self.run.exclude)]
        {
            if names.iter().any(|n| n.trim().is_empty()) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must not contain empty names".to_string(),
                });
            }
        }

        if self.telemetry.error_log.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "telemetry.error_log".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: PatternsConfig = toml::from_str("").unwrap();
        assert_eq!(config, PatternsConfig::default());
        assert_eq!(config.output.header, "== {name} ==");
        assert!(config.output.color);
        assert_eq!(config.telemetry.error_log, PathBuf::from(".patterns/errors.jsonl"));
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[output]
format = "json"
color = false
verbose = true
header = "--- {name} ---"

[run]
include = ["adapter", "bridge"]
exclude = ["bridge"]

[telemetry]
collect_errors = true
error_log = "logs/errors.jsonl"
"#;
        let config: PatternsConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert!(config.output.verbose);
        assert_eq!(config.output.header_for("adapter"), "--- adapter ---");
        assert_eq!(config.run.include, vec!["adapter", "bridge"]);
        assert_eq!(config.run.exclude, vec!["bridge"]);
        assert!(config.telemetry.collect_errors);
        assert_eq!(config.telemetry.error_log, PathBuf::from("logs/errors.jsonl"));
        assert!(config.is_valid());
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let result: Result<PatternsConfig, _> = toml::from_str("[output]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_header_without_placeholder() {
        let config: PatternsConfig = toml::from_str("[output]\nheader = \"demo\"\n").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.header");
        assert_eq!(errors[0].to_string(), "patterns.toml: 'output.header' must contain {name}");
    }

    #[test]
    fn test_validation_empty_names() {
        let config: PatternsConfig =
            toml::from_str("[run]\ninclude = [\"\"]\nexclude = [\" \"]\n").unwrap();
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["run.include", "run.exclude"]);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("console".parse::<OutputFormat>(), Ok(OutputFormat::Console));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
