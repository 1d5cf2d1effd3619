//! Headline statistics of raw and cleaned datasets, for logs and `summary.json`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use super::Dataset;
use crate::records::{CleanedOrder, RawOrder};
use crate::utils::round_to;

/// Overview of a raw dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSummary {
    pub rows: usize,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
    pub total_sales: f64,
    pub total_profit: f64,
    pub regions: usize,
    pub categories: usize,
}

impl RawSummary {
    pub fn from_dataset(dataset: &Dataset<RawOrder>) -> Self {
        let regions: BTreeSet<_> = dataset.iter().map(|r| r.region).collect();
        let categories: BTreeSet<_> = dataset.iter().map(|r| r.category).collect();

        Self {
            rows: dataset.len(),
            first_order_date: dataset.iter().map(|r| r.order_date).min(),
            last_order_date: dataset.iter().map(|r| r.order_date).max(),
            total_sales: round_to(dataset.iter().map(|r| r.sales).sum(), 2),
            total_profit: round_to(dataset.iter().map(|r| r.profit).sum(), 2),
            regions: regions.len(),
            categories: categories.len(),
        }
    }

    pub fn log(&self) {
        info!(
            rows = self.rows,
            first_order_date = ?self.first_order_date,
            last_order_date = ?self.last_order_date,
            total_sales = self.total_sales,
            total_profit = self.total_profit,
            regions = self.regions,
            categories = self.categories,
            "Raw dataset summary"
        );
    }
}

/// Overview of a cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedSummary {
    pub rows: usize,
    pub columns: usize,
    pub min_sales: Option<f64>,
    pub max_sales: Option<f64>,
    pub min_profit: Option<f64>,
    pub max_profit: Option<f64>,
    /// Mean discount as a fraction.
    pub avg_discount: Option<f64>,
    pub avg_ship_duration_days: Option<f64>,
    /// Records whose profit margin is undefined.
    pub undefined_margins: usize,
}

impl CleanedSummary {
    pub fn from_dataset(dataset: &Dataset<CleanedOrder>) -> Self {
        let sales: Vec<f64> = dataset.iter().map(|c| c.raw.sales).collect();
        let profit: Vec<f64> = dataset.iter().map(|c| c.raw.profit).collect();
        let discount: Vec<f64> = dataset.iter().map(|c| c.raw.discount).collect();
        let duration: Vec<f64> = dataset
            .iter()
            .map(|c| c.derived.ship_duration_days as f64)
            .collect();

        Self {
            rows: dataset.len(),
            columns: crate::records::RAW_COLUMNS.len() + crate::records::DERIVED_COLUMNS.len(),
            min_sales: min(&sales),
            max_sales: max(&sales),
            min_profit: min(&profit),
            max_profit: max(&profit),
            avg_discount: mean(&discount).map(|m| round_to(m, 4)),
            avg_ship_duration_days: mean(&duration).map(|m| round_to(m, 2)),
            undefined_margins: dataset
                .iter()
                .filter(|c| c.derived.profit_margin.is_none())
                .count(),
        }
    }

    pub fn log(&self) {
        info!(
            rows = self.rows,
            columns = self.columns,
            min_sales = ?self.min_sales,
            max_sales = ?self.max_sales,
            min_profit = ?self.min_profit,
            max_profit = ?self.max_profit,
            avg_discount = ?self.avg_discount,
            avg_ship_duration_days = ?self.avg_ship_duration_days,
            "Cleaned dataset summary"
        );
    }
}

fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
