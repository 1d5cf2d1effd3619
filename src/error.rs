//! Error types for sales-forge operations.
//!
//! Defines error types for each stage that can fail:
//! - Record generation (parameters and generated-record invariants)
//! - Dataset loading (CSV parsing and catalog invariants)
//! - Dataset export (CSV, Parquet, JSON summaries)
//!
//! Cleaning itself never fails: temporal and quantity anomalies are resolved
//! by the anomaly policy and undefined ratios become nulls.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during record generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid parameter value: {0}")]
    InvalidParameter(String),

    #[error("Generated order '{order_id}' violates an invariant: {reason}")]
    InvariantViolation { order_id: String, reason: String },
}

/// Errors that can occur while loading a raw dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row} ('{order_id}') violates the catalog: {reason}")]
    InvalidRecord {
        row: usize,
        order_id: String,
        reason: String,
    },

    #[error("Duplicate order id '{order_id}' at row {row}")]
    DuplicateOrderId { row: usize, order_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
