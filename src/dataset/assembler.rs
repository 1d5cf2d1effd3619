//! Turns a raw dataset into the cleaned dataset handed to consumers.
//!
//! The raw records are cut into fixed-size batches, each batch is cleaned by
//! the [`Deriver`], and the batches are concatenated in their original order.
//! Batches are independent, so they may run in parallel; the output never
//! depends on the worker count.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::summary::CleanedSummary;
use super::Dataset;
use crate::derivation::{AnomalyKind, AnomalyPolicy, AnomalyReport, Deriver, DEFAULT_DECIMALS};
use crate::records::{CleanedOrder, RawOrder};

/// Settings for the cleaning stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Anomaly policy applied to every record.
    pub policy: AnomalyPolicy,
    /// Decimal places of profit margin and revenue per unit.
    pub decimals: u32,
    /// Records per cleaning batch.
    pub batch_size: usize,
    /// Clean batches on the rayon global pool.
    pub parallel: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            policy: AnomalyPolicy::Exclude,
            decimals: DEFAULT_DECIMALS,
            batch_size: 1_000,
            parallel: false,
        }
    }
}

/// The cleaned dataset together with what happened while building it.
#[derive(Debug, Clone)]
pub struct AssembledDataset {
    pub dataset: Dataset<CleanedOrder>,
    pub report: AnomalyReport,
}

/// Materializes cleaned datasets under one configuration.
#[derive(Debug, Clone)]
pub struct DatasetAssembler {
    config: AssemblerConfig,
    deriver: Deriver,
}

impl Default for DatasetAssembler {
    fn default() -> Self {
        Self::new(AssemblerConfig::default())
    }
}

impl DatasetAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        let deriver = Deriver::new(config.policy, config.decimals);
        Self { config, deriver }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Cleans `raw`, preserving its order.
    ///
    /// Row `i` of the result is derived from the `i`-th raw record that the
    /// anomaly policy kept. Under [`AnomalyPolicy::Clamp`] nothing is dropped.
    pub fn assemble(&self, raw: Dataset<RawOrder>) -> AssembledDataset {
        let batch_size = self.config.batch_size.max(1);
        let batches = into_batches(raw.into_records(), batch_size);
        debug!(
            batches = batches.len(),
            batch_size,
            parallel = self.config.parallel,
            "Cleaning raw dataset"
        );

        let results: Vec<(Vec<CleanedOrder>, AnomalyReport)> = if self.config.parallel {
            batches
                .into_par_iter()
                .map(|batch| self.deriver.clean_batch(batch))
                .collect()
        } else {
            batches
                .into_iter()
                .map(|batch| self.deriver.clean_batch(batch))
                .collect()
        };

        let mut report = AnomalyReport::new(self.config.policy);
        let mut records = Vec::with_capacity(results.iter().map(|(r, _)| r.len()).sum());
        for (cleaned, batch_report) in results {
            records.extend(cleaned);
            report.merge(batch_report);
        }

        log_report(&report);
        let dataset = Dataset::from_records(records);
        CleanedSummary::from_dataset(&dataset).log();

        AssembledDataset { dataset, report }
    }
}

fn into_batches(records: Vec<RawOrder>, batch_size: usize) -> Vec<Vec<RawOrder>> {
    let mut batches = Vec::with_capacity(records.len().div_ceil(batch_size));
    let mut iter = records.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(batch_size).collect());
    }
    batches
}

fn log_report(report: &AnomalyReport) {
    let governed: usize = report
        .by_kind
        .iter()
        .filter(|(kind, _)| kind.is_policy_governed())
        .map(|(_, count)| count)
        .sum();

    if governed > 0 {
        warn!(
            policy = %report.policy,
            ship_before_order = report.count(AnomalyKind::ShipBeforeOrder),
            non_positive_quantity = report.count(AnomalyKind::NonPositiveQuantity),
            excluded = report.excluded_rows,
            corrected = report.corrected_rows,
            "Anomalous records resolved by policy"
        );
    }
    let zero_sales = report.count(AnomalyKind::ZeroSales);
    if zero_sales > 0 {
        warn!(
            records = zero_sales,
            "Zero sales records left with undefined profit margin"
        );
    }

    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows(),
        "Cleaned dataset assembled"
    );
}
