//! Configuration loading and discovery for `patterns.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{OutputFormat, PatternsConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "patterns.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse patterns.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override progress format
    pub format: Option<OutputFormat>,
    /// Override console colors
    pub color: Option<bool>,
    /// Override verbose progress
    pub verbose: Option<bool>,
    /// Enable error collection
    pub collect_errors: Option<bool>,
}

/// Where the active configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`
    Explicit(PathBuf),
    /// Found by [`find_config`]
    Discovered(PathBuf),
    /// No file; built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Resolve an explicit path, or fall back to discovery.
    pub fn locate(path: Option<&Path>) -> Self {
        match path {
            Some(p) => ConfigSource::Explicit(p.to_path_buf()),
            None => match find_config() {
                Some(found) => ConfigSource::Discovered(found),
                None => ConfigSource::Defaults,
            },
        }
    }

    /// Whether the user named this file on the command line.
    pub fn is_explicit(&self) -> bool {
        matches!(self, ConfigSource::Explicit(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Discovered(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

/// Find patterns.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for patterns.toml
/// 2. Check XDG_CONFIG_HOME/patterns/patterns.toml (or ~/.config/patterns/patterns.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find patterns.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("patterns").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find patterns.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a patterns.toml file.
///
/// If a path is provided, loads from that file and fails if it is missing.
/// Otherwise uses [`find_config`]; when nothing is found the defaults apply.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("ci/patterns.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<PatternsConfig, ConfigError> {
    load_from_source(&ConfigSource::locate(path))
}

/// Load the configuration a [`ConfigSource`] points at.
pub fn load_from_source(source: &ConfigSource) -> Result<PatternsConfig, ConfigError> {
    match source.path() {
        Some(p) => load_config_file(p),
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<PatternsConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PatternsConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no patterns.toml is found.
pub fn default_config() -> PatternsConfig {
    PatternsConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PatternsConfig, overrides: &CliOverrides) {
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if let Some(color) = overrides.color {
        config.output.color = color;
    }
    if let Some(verbose) = overrides.verbose {
        config.output.verbose = verbose;
    }
    if let Some(collect_errors) = overrides.collect_errors {
        config.telemetry.collect_errors = collect_errors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[output]\nverbose = true\n");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("a").join("b");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let xdg_dir = temp.path().join("patterns");
        fs::create_dir_all(&xdg_dir).expect("should create xdg dir");
        let config_path = write_config(&xdg_dir, "");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            r##"
[output]
format = "json"
header = "# {name}"

[run]
exclude = ["singleton"]
"##,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.header_for("borg"), "# borg");
        assert_eq!(config.run.exclude, vec!["singleton"]);
    }

    #[test]
    fn test_config_source_locate_explicit() {
        let source = ConfigSource::locate(Some(Path::new("ci/patterns.toml")));
        assert!(source.is_explicit());
        assert_eq!(source.path(), Some(Path::new("ci/patterns.toml")));
    }

    #[test]
    fn test_load_from_source_defaults_and_discovered() {
        let config = load_from_source(&ConfigSource::Defaults).expect("defaults always load");
        assert_eq!(config.output.format, OutputFormat::Console);

        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[output]\nheader = \"none\"\n");
        let source = ConfigSource::Discovered(config_path);
        assert!(!source.is_explicit());
        assert!(matches!(load_from_source(&source), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_config_explicit_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[output]\nheader = \"no placeholder\"\n");

        let result = load_config(Some(&config_path));
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("output.header"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            format: Some(OutputFormat::Json),
            color: Some(false),
            verbose: Some(true),
            collect_errors: Some(true),
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert!(config.output.verbose);
        assert!(config.telemetry.collect_errors);
    }

    #[test]
    fn test_merge_cli_overrides_empty_keeps_file_values() {
        let mut config = default_config();
        config.output.verbose = true;
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert!(config.output.verbose);
        assert_eq!(config.output.format, OutputFormat::Console);
    }
}
