//! Configuration management for ngormgen.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Command-line flags (applied by the CLI, highest priority)
//! 2. Environment variables
//! 3. Project-local `ngorm.toml` file
//! 4. User config `~/.config/ngorm/config.toml`
//! 5. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which declarations take part in a run.
    pub scan: ScanConfig,

    /// External name derivation.
    pub naming: NamingConfig,

    /// Where and how the artifact is written.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./ngorm.toml` (project local)
    /// 2. `~/.config/ngorm/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(prefix) = lookup("NGORM_TRIM_PREFIX") {
            self.naming.trim_prefix = Some(prefix);
        }
        if let Some(flag) = lookup("NGORM_LINE_COMMENT") {
            if let Ok(b) = flag.parse() {
                self.naming.line_comment = b;
            }
        }
        if let Some(types) = lookup("NGORM_TYPES") {
            self.scan.types = split_list(&types);
        }
        if let Some(output) = lookup("NGORM_OUTPUT") {
            self.output.path = Some(PathBuf::from(output));
        }
        if let Some(runtime) = lookup("NGORM_RUNTIME") {
            self.output.runtime = runtime;
        }
    }

    /// Reject settings no run could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("output.file_name is empty".to_string()));
        }
        if self.output.runtime.trim().is_empty() {
            return Err(ConfigError::Invalid("output.runtime is empty".to_string()));
        }
        if let Some(name) = self.scan.types.iter().find(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "scan.types contains an empty name ({name:?})"
            )));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Declaration selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Declared type names to generate for. Empty means every declaration.
    pub types: Vec<String>,

    /// Enabled build constraints (`#[cfg(feature = "x")]` and bare cfg names).
    pub tags: Vec<String>,
}

/// External name derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Literal prefix removed from declared names before case folding.
    pub trim_prefix: Option<String>,

    /// Reuse struct doc comments as the schema comment of tags and edges.
    pub line_comment: bool,
}

/// Artifact placement and generated code paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Explicit output path. Defaults to `file_name` beside the declarations.
    pub path: Option<PathBuf>,

    /// File name used when `path` is not set.
    pub file_name: String,

    /// Path of the runtime crate as referenced from generated code.
    pub runtime: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
            runtime: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

impl OutputConfig {
    /// Output path for declarations scanned from `dir`.
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => dir.join(self.file_name.to_lowercase()),
        }
    }
}

/// Split a comma-separated flag value, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
