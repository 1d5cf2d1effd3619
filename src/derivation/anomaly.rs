//! Anomaly policy and per-run anomaly accounting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How records violating a temporal or quantity invariant are resolved.
///
/// One policy applies to every record in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyPolicy {
    /// Drop the record from the cleaned dataset.
    #[default]
    Exclude,
    /// Correct the record: ship date becomes the order date, a zero
    /// quantity becomes 1.
    Clamp,
}

impl fmt::Display for AnomalyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyPolicy::Exclude => write!(f, "exclude"),
            AnomalyPolicy::Clamp => write!(f, "clamp"),
        }
    }
}

impl std::str::FromStr for AnomalyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" | "drop" => Ok(AnomalyPolicy::Exclude),
            "clamp" | "correct" => Ok(AnomalyPolicy::Clamp),
            other => Err(format!("Unknown anomaly policy: {}", other)),
        }
    }
}

/// Kind of anomaly found in a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Ship date earlier than order date.
    ShipBeforeOrder,
    /// Quantity of zero.
    NonPositiveQuantity,
    /// Sales of exactly zero; the profit margin is left undefined.
    ZeroSales,
}

impl AnomalyKind {
    /// Whether the anomaly policy applies. Zero sales only nulls the margin.
    pub fn is_policy_governed(&self) -> bool {
        !matches!(self, AnomalyKind::ZeroSales)
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnomalyKind::ShipBeforeOrder => "ship_before_order",
            AnomalyKind::NonPositiveQuantity => "non_positive_quantity",
            AnomalyKind::ZeroSales => "zero_sales",
        };
        f.write_str(name)
    }
}

/// An anomaly attached to a specific order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub order_id: String,
    pub kind: AnomalyKind,
}

/// Totals of anomalies seen while cleaning a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub policy: AnomalyPolicy,
    /// Records in the raw input.
    pub input_rows: usize,
    /// Records dropped under [`AnomalyPolicy::Exclude`].
    pub excluded_rows: usize,
    /// Records corrected under [`AnomalyPolicy::Clamp`].
    pub corrected_rows: usize,
    /// Anomaly occurrences by kind.
    pub by_kind: BTreeMap<AnomalyKind, usize>,
}

impl AnomalyReport {
    pub fn new(policy: AnomalyPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn record(&mut self, anomaly: &Anomaly) {
        *self.by_kind.entry(anomaly.kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: AnomalyKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.by_kind.values().sum()
    }

    /// Rows that reach the cleaned dataset.
    pub fn output_rows(&self) -> usize {
        self.input_rows - self.excluded_rows
    }

    /// Folds a per-batch report into this one.
    pub fn merge(&mut self, other: AnomalyReport) {
        self.input_rows += other.input_rows;
        self.excluded_rows += other.excluded_rows;
        self.corrected_rows += other.corrected_rows;
        for (kind, count) in other.by_kind {
            *self.by_kind.entry(kind).or_insert(0) += count;
        }
    }
}
