//! Worker configuration parsing and validation.
//!
//! The formatter's language hint defaults to the target's own file name, so
//! a `.js`, `.m` or `.proto` target is formatted as that language. Earlier
//! worker builds always passed `/dev/null`, which selects C++; set
//! `formatter.assume_filename = "/dev/null"` to keep that behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

/// Settings for the external formatting engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FormatterConfig {
    /// Formatter executable, resolved through `PATH` when not absolute.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Style used by the engine when the candidate does not name a base style.
    #[serde(default = "default_fallback_style")]
    pub fallback_style: String,
    /// Filename hint for language detection. Defaults to the target's file name.
    #[serde(default)]
    pub assume_filename: Option<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            fallback_style: default_fallback_style(),
            assume_filename: None,
        }
    }
}

fn default_binary() -> PathBuf {
    PathBuf::from("clang-format")
}

fn default_fallback_style() -> String {
    "LLVM".into()
}

/// Worker configuration, optionally loaded from a TOML file.
///
/// The fitness target is never read from the file; it always comes from
/// the command line via [`WorkerConfig::with_target`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct WorkerConfig {
    /// Source file scored by every `evolve.measure` request.
    #[serde(skip)]
    pub target: PathBuf,
    /// Formatting engine settings.
    #[serde(default)]
    pub formatter: FormatterConfig,
    /// Score an unreadable target as empty content instead of failing.
    #[serde(default)]
    pub allow_missing_target: bool,
}

impl WorkerConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Attach the fitness target path.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    /// Filename hint handed to the formatter for language detection.
    #[must_use]
    pub fn assume_filename(&self) -> String {
        if let Some(ref hint) = self.formatter.assume_filename {
            return hint.clone();
        }
        self.target
            .file_name()
            .map_or_else(|| "/dev/null".to_owned(), |name| name.to_string_lossy().into_owned())
    }

    fn validate(&self) -> Result<()> {
        if self.formatter.binary.as_os_str().is_empty() {
            return Err(AppError::Config("formatter.binary must not be empty".into()));
        }

        if self.formatter.fallback_style.trim().is_empty() {
            return Err(AppError::Config(
                "formatter.fallback_style must not be empty".into(),
            ));
        }

        Ok(())
    }
}
