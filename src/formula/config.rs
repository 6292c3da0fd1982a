//! Configuration loading
//!
//! `defaults/formula.default.toml` is embedded into the crate so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those
//! defaults via [`Loader`] before deserializing into [`FormulaConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/formula.default.toml");

/// Top-level configuration consumed by the engine and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormulaConfig {
    pub validation: ValidationLimits,
    pub variables: VariableLimits,
    pub display: DisplayConfig,
}

/// Limits enforced by the structural validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ValidationLimits {
    pub max_formula_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_formula_length: 500,
        }
    }
}

/// Limits on caller-supplied variable bindings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VariableLimits {
    pub max_count: usize,
    pub max_name_length: usize,
    pub min_value: f64,
    pub max_value: f64,
}

impl Default for VariableLimits {
    fn default() -> Self {
        Self {
            max_count: 10,
            max_name_length: 20,
            min_value: -1e10,
            max_value: 1e10,
        }
    }
}

/// Knobs for [format_number](crate::formula::formatting::format_number).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DisplayConfig {
    pub fixed_digits: usize,
    pub small_threshold: f64,
    pub large_threshold: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fixed_digits: 4,
            small_threshold: 1e-4,
            large_threshold: 9999.0,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FormulaConfig, ConfigError> {
        let config = self.builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FormulaConfig, ConfigError> {
    Loader::new().build()
}
