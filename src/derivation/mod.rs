//! Derivation of analytics fields from raw orders.
//!
//! Each cleaned record is a pure function of one raw record: no randomness
//! and no state shared between records. Records breaking a temporal or
//! quantity invariant go through the run's [`AnomalyPolicy`]:
//!
//! - `Exclude` drops them and counts the drop
//! - `Clamp` corrects them (ship date := order date, quantity := 1)
//!
//! A zero sales value is kept and leaves the profit margin undefined.

pub mod anomaly;
pub mod calendar;

pub use anomaly::{Anomaly, AnomalyKind, AnomalyPolicy, AnomalyReport};

use crate::records::{CleanedOrder, DerivedFields, RawOrder};
use crate::utils::round_to;
use calendar::{calendar_parts, day_of_week, days_between, month_name, year_quarter_label};

/// Default number of decimal places for ratio fields.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Result of cleaning one raw order.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanOutcome {
    /// The record reaches the cleaned dataset, possibly after correction.
    Kept {
        order: CleanedOrder,
        anomalies: Vec<Anomaly>,
    },
    /// The record was dropped by the exclude policy.
    Excluded { anomalies: Vec<Anomaly> },
}

impl CleanOutcome {
    pub fn anomalies(&self) -> &[Anomaly] {
        match self {
            CleanOutcome::Kept { anomalies, .. } | CleanOutcome::Excluded { anomalies } => {
                anomalies
            }
        }
    }

    pub fn into_order(self) -> Option<CleanedOrder> {
        match self {
            CleanOutcome::Kept { order, .. } => Some(order),
            CleanOutcome::Excluded { .. } => None,
        }
    }
}

/// Computes derived fields under a fixed anomaly policy and rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deriver {
    policy: AnomalyPolicy,
    decimals: u32,
}

impl Default for Deriver {
    fn default() -> Self {
        Self::new(AnomalyPolicy::default(), DEFAULT_DECIMALS)
    }
}

impl Deriver {
    pub fn new(policy: AnomalyPolicy, decimals: u32) -> Self {
        Self { policy, decimals }
    }

    pub fn policy(&self) -> AnomalyPolicy {
        self.policy
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Lists the anomalies present in a raw order, in a fixed order.
    pub fn inspect(raw: &RawOrder) -> Vec<Anomaly> {
        let mut kinds = Vec::new();
        if raw.ship_date < raw.order_date {
            kinds.push(AnomalyKind::ShipBeforeOrder);
        }
        if raw.quantity == 0 {
            kinds.push(AnomalyKind::NonPositiveQuantity);
        }
        if raw.sales == 0.0 {
            kinds.push(AnomalyKind::ZeroSales);
        }
        kinds
            .into_iter()
            .map(|kind| Anomaly {
                order_id: raw.order_id.clone(),
                kind,
            })
            .collect()
    }

    /// Cleans one raw order.
    pub fn clean(&self, mut raw: RawOrder) -> CleanOutcome {
        let anomalies = Self::inspect(&raw);
        let governed = anomalies.iter().any(|a| a.kind.is_policy_governed());

        if governed {
            match self.policy {
                AnomalyPolicy::Exclude => return CleanOutcome::Excluded { anomalies },
                AnomalyPolicy::Clamp => {
                    if raw.ship_date < raw.order_date {
                        raw.ship_date = raw.order_date;
                    }
                    if raw.quantity == 0 {
                        raw.quantity = 1;
                    }
                }
            }
        }

        let derived = self.derive_fields(&raw);
        CleanOutcome::Kept {
            order: CleanedOrder { raw, derived },
            anomalies,
        }
    }

    /// Cleans a batch in order, returning the kept records and the batch report.
    pub fn clean_batch(&self, batch: Vec<RawOrder>) -> (Vec<CleanedOrder>, AnomalyReport) {
        let mut report = AnomalyReport::new(self.policy);
        report.input_rows = batch.len();
        let mut kept = Vec::with_capacity(batch.len());

        for raw in batch {
            let outcome = self.clean(raw);
            for anomaly in outcome.anomalies() {
                report.record(anomaly);
            }
            let governed = outcome
                .anomalies()
                .iter()
                .any(|a| a.kind.is_policy_governed());
            match outcome.into_order() {
                Some(order) => {
                    if governed {
                        report.corrected_rows += 1;
                    }
                    kept.push(order);
                }
                None => report.excluded_rows += 1,
            }
        }

        (kept, report)
    }

    /// Requires `raw.quantity >= 1` and `raw.ship_date >= raw.order_date`.
    fn derive_fields(&self, raw: &RawOrder) -> DerivedFields {
        debug_assert!(raw.quantity >= 1);
        debug_assert!(raw.ship_date >= raw.order_date);

        let (year, month, quarter) = calendar_parts(raw.order_date);

        let profit_margin = if raw.sales == 0.0 {
            None
        } else {
            let margin = round_to(raw.profit / raw.sales * 100.0, self.decimals);
            margin.is_finite().then_some(margin)
        };

        DerivedFields {
            year,
            month,
            quarter,
            year_quarter: year_quarter_label(year, quarter),
            month_name: month_name(raw.order_date),
            day_of_week: day_of_week(raw.order_date),
            ship_duration_days: days_between(raw.order_date, raw.ship_date),
            profit_margin,
            revenue_per_unit: round_to(raw.sales / raw.quantity as f64, self.decimals),
        }
    }
}
