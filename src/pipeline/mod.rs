//! Run orchestration for sales-forge.
//!
//! A run flows through fixed stages:
//!
//! 1. **Configuration**: defaults, YAML file, environment, CLI flags ([`ForgeConfig`])
//! 2. **Generation** or **loading**: the raw dataset
//! 3. **Cleaning**: anomaly policy and derived fields
//! 4. **Export**: CSV, optional Parquet, `summary.json`
//!
//! # Example
//!
//! ```rust,no_run
//! use sales_forge::pipeline::{ForgeConfig, ForgeRunner};
//!
//! let config = ForgeConfig::new()
//!     .with_record_count(1_000)
//!     .with_seed(7)
//!     .with_output_dir("./output");
//!
//! let outcome = ForgeRunner::new(config)?.run_generate()?;
//! println!("{} cleaned rows", outcome.summary.cleaned.rows);
//! # Ok::<(), sales_forge::pipeline::RunError>(())
//! ```

pub mod config;
pub mod runner;

pub use config::{ConfigError, ForgeConfig, OutputConfig, MAX_DECIMALS};
pub use runner::{ForgeRunner, RunError, RunOutcome};
