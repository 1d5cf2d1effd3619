//! Run configuration for sales-forge.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! `SALES_FORGE_*` environment variables, then command-line flags (applied by
//! the CLI through the `with_*` builders).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::AssemblerConfig;
use crate::generator::GeneratorConfig;
use crate::records::DATE_FORMAT;

/// Largest supported number of decimal places for derived ratios.
pub const MAX_DECIMALS: u32 = 6;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// The YAML configuration file could not be parsed.
    #[error("Invalid configuration file {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and what a run writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving every output file.
    pub dir: PathBuf,
    /// Write `raw_sales.csv` next to the cleaned dataset.
    pub raw_csv: bool,
    /// Write `cleaned_sales.parquet` next to the cleaned CSV.
    pub parquet: bool,
    /// Write `summary.json`.
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
            raw_csv: true,
            parquet: false,
            summary: true,
        }
    }
}

impl OutputConfig {
    pub fn raw_csv_path(&self) -> PathBuf {
        self.dir.join("raw_sales.csv")
    }

    pub fn cleaned_csv_path(&self) -> PathBuf {
        self.dir.join("cleaned_sales.csv")
    }

    pub fn parquet_path(&self) -> PathBuf {
        self.dir.join("cleaned_sales.parquet")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join("summary.json")
    }
}

/// Complete configuration of a generate or clean run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub generator: GeneratorConfig,
    pub cleaning: AssemblerConfig,
    pub output: OutputConfig,
}

impl ForgeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a YAML file. Missing keys keep their
    /// defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Creates configuration from defaults overridden by environment
    /// variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides settings from `SALES_FORGE_*` environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SALES_FORGE_RECORDS`: Number of records to generate
    /// - `SALES_FORGE_START_DATE`, `SALES_FORGE_END_DATE`: Order date range (`YYYY-MM-DD`)
    /// - `SALES_FORGE_SEED`: RNG seed
    /// - `SALES_FORGE_WORKERS`: Generation partitions
    /// - `SALES_FORGE_CHRONOLOGICAL`: Sort raw records by order date
    /// - `SALES_FORGE_ID_PREFIX`: Order id prefix
    /// - `SALES_FORGE_POLICY`: Anomaly policy (`exclude` or `clamp`)
    /// - `SALES_FORGE_DECIMALS`: Decimal places of derived ratios
    /// - `SALES_FORGE_BATCH_SIZE`: Records per cleaning batch
    /// - `SALES_FORGE_PARALLEL`: Clean batches in parallel
    /// - `SALES_FORGE_OUTPUT_DIR`: Output directory
    /// - `SALES_FORGE_PARQUET`: Also write Parquet
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any variable lookup.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Generation settings
        if let Some(val) = lookup("SALES_FORGE_RECORDS") {
            self.generator.record_count = parse_env_value(&val, "SALES_FORGE_RECORDS")?;
        }

        if let Some(val) = lookup("SALES_FORGE_START_DATE") {
            self.generator.start_date = parse_env_date(&val, "SALES_FORGE_START_DATE")?;
        }

        if let Some(val) = lookup("SALES_FORGE_END_DATE") {
            self.generator.end_date = parse_env_date(&val, "SALES_FORGE_END_DATE")?;
        }

        if let Some(val) = lookup("SALES_FORGE_SEED") {
            self.generator.seed = parse_env_value(&val, "SALES_FORGE_SEED")?;
        }

        if let Some(val) = lookup("SALES_FORGE_WORKERS") {
            self.generator.workers = parse_env_value(&val, "SALES_FORGE_WORKERS")?;
        }

        if let Some(val) = lookup("SALES_FORGE_CHRONOLOGICAL") {
            self.generator.chronological = parse_env_bool(&val, "SALES_FORGE_CHRONOLOGICAL")?;
        }

        if let Some(val) = lookup("SALES_FORGE_ID_PREFIX") {
            self.generator.id_prefix = val;
        }

        // Cleaning settings
        if let Some(val) = lookup("SALES_FORGE_POLICY") {
            self.cleaning.policy = val.parse().map_err(|message| ConfigError::InvalidValue {
                key: "SALES_FORGE_POLICY".to_string(),
                message,
            })?;
        }

        if let Some(val) = lookup("SALES_FORGE_DECIMALS") {
            self.cleaning.decimals = parse_env_value(&val, "SALES_FORGE_DECIMALS")?;
        }

        if let Some(val) = lookup("SALES_FORGE_BATCH_SIZE") {
            self.cleaning.batch_size = parse_env_value(&val, "SALES_FORGE_BATCH_SIZE")?;
        }

        if let Some(val) = lookup("SALES_FORGE_PARALLEL") {
            self.cleaning.parallel = parse_env_bool(&val, "SALES_FORGE_PARALLEL")?;
        }

        // Output settings
        if let Some(val) = lookup("SALES_FORGE_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(val);
        }

        if let Some(val) = lookup("SALES_FORGE_PARQUET") {
            self.output.parquet = parse_env_bool(&val, "SALES_FORGE_PARQUET")?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        if generator.record_count == 0 {
            return Err(ConfigError::ValidationFailed(
                "record_count must be greater than 0".to_string(),
            ));
        }

        if generator.start_date > generator.end_date {
            return Err(ConfigError::ValidationFailed(format!(
                "start_date {} must not be after end_date {}",
                generator.start_date, generator.end_date
            )));
        }

        if generator.workers == 0 {
            return Err(ConfigError::ValidationFailed(
                "workers must be greater than 0".to_string(),
            ));
        }

        if generator.id_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "id_prefix cannot be empty".to_string(),
            ));
        }

        if self.cleaning.batch_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        if self.cleaning.decimals > MAX_DECIMALS {
            return Err(ConfigError::ValidationFailed(format!(
                "decimals must be at most {}",
                MAX_DECIMALS
            )));
        }

        Ok(())
    }

    /// Builder method to set the record count.
    pub fn with_record_count(mut self, count: usize) -> Self {
        self.generator.record_count = count;
        self
    }

    /// Builder method to set the order date range.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.generator.start_date = start;
        self.generator.end_date = end;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.generator.seed = seed;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.generator.workers = workers;
        self
    }

    /// Builder method to set the anomaly policy.
    pub fn with_policy(mut self, policy: crate::derivation::AnomalyPolicy) -> Self {
        self.cleaning.policy = policy;
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.cleaning.decimals = decimals;
        self
    }

    /// Builder method to set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }

    pub fn with_parquet(mut self, enabled: bool) -> Self {
        self.output.parquet = enabled;
        self
    }
}

/// Parse an environment variable value into a type.
fn parse_env_value<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("could not parse '{}'", value),
    })
}

/// Parse an environment variable as a boolean.
fn parse_env_bool(value: &str, key: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected boolean value, got '{}'", value),
        }),
    }
}

fn parse_env_date(value: &str, key: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected a YYYY-MM-DD date, got '{}'", value),
    })
}
