//! `summary.json`: what a run produced and what the cleaning stage did.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{CleanedSummary, RawSummary};
use crate::derivation::AnomalyReport;
use crate::error::ExportError;

/// Contents of `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub raw: RawSummary,
    pub cleaned: CleanedSummary,
    pub anomalies: AnomalyReport,
}

/// Write a run summary as pretty-printed JSON.
pub fn write_summary_json(summary: &RunSummary, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Summary written");
    Ok(())
}

/// Read a run summary back from disk.
pub fn read_summary_json(path: &Path) -> Result<RunSummary, ExportError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
