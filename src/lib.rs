//! sales-forge: synthetic retail sales dataset generation and cleaning.
//!
//! This library generates seasonally weighted retail orders from a fixed
//! geography and product catalog, resolves anomalous records under a single
//! policy, derives calendar, shipping and profitability fields, and exports
//! the result.

// Core modules
pub mod catalog;
pub mod cli;
pub mod dataset;
pub mod derivation;
pub mod error;
pub mod export;
pub mod generator;
pub mod pipeline;
pub mod records;
pub mod utils;

// Re-export commonly used types
pub use dataset::{AssembledDataset, AssemblerConfig, Dataset, DatasetAssembler};
pub use derivation::{AnomalyPolicy, AnomalyReport, Deriver};
pub use error::{DatasetError, ExportError, GeneratorError};
pub use generator::{GeneratorConfig, RecordGenerator};
pub use records::{CleanedOrder, DerivedFields, RawOrder};
