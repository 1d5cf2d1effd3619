//! Order record types shared by every stage.
//!
//! A [`RawOrder`] carries the 16 generated fields. A [`CleanedOrder`] wraps a
//! raw order together with the 9 [`DerivedFields`] computed from it. Column
//! names and order match the exported tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category, Region, Segment, ShipMode};

/// Column headers of the raw dataset, in export order.
pub const RAW_COLUMNS: [&str; 16] = [
    "Order_ID",
    "Order_Date",
    "Ship_Date",
    "Ship_Mode",
    "Customer_Name",
    "Segment",
    "City",
    "State",
    "Region",
    "Category",
    "Sub_Category",
    "Product_Name",
    "Sales",
    "Quantity",
    "Discount",
    "Profit",
];

/// Column headers appended by derivation, in export order.
pub const DERIVED_COLUMNS: [&str; 9] = [
    "Year",
    "Month",
    "Quarter",
    "Year_Quarter",
    "Month_Name",
    "Day_of_Week",
    "Ship_Duration_Days",
    "Profit_Margin",
    "Revenue_Per_Unit",
];

/// Date format used for every exported date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Highest discount any order may carry.
pub const MAX_DISCOUNT: f64 = 0.40;

/// Decimal places of the raw money and discount columns in every export.
pub const RAW_DECIMALS: usize = 2;

/// One synthetic sales transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    #[serde(rename = "Order_ID")]
    pub order_id: String,
    #[serde(rename = "Order_Date")]
    pub order_date: NaiveDate,
    #[serde(rename = "Ship_Date")]
    pub ship_date: NaiveDate,
    #[serde(rename = "Ship_Mode")]
    pub ship_mode: ShipMode,
    #[serde(rename = "Customer_Name")]
    pub customer_name: String,
    #[serde(rename = "Segment")]
    pub segment: Segment,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Sub_Category")]
    pub sub_category: String,
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Sales")]
    pub sales: f64,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Discount")]
    pub discount: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
}

impl RawOrder {
    /// Checks the catalog invariants: the city exists and determines state
    /// and region, the sub-category belongs to the category, and the
    /// discount is within range.
    ///
    /// Temporal ordering and quantity are not checked here; those are
    /// resolved by the cleaning anomaly policy.
    pub fn check_catalog(&self) -> Result<(), String> {
        let city = catalog::city(&self.city)
            .ok_or_else(|| format!("unknown city '{}'", self.city))?;
        if city.region != self.region {
            return Err(format!(
                "city '{}' belongs to region {}, record says {}",
                self.city, city.region, self.region
            ));
        }
        if city.state != self.state {
            return Err(format!(
                "city '{}' is in {}, record says {}",
                self.city, city.state, self.state
            ));
        }

        let sub = catalog::sub_category(&self.sub_category)
            .ok_or_else(|| format!("unknown sub-category '{}'", self.sub_category))?;
        if sub.category != self.category {
            return Err(format!(
                "sub-category '{}' belongs to {}, record says {}",
                self.sub_category, sub.category, self.category
            ));
        }

        if !(0.0..=MAX_DISCOUNT).contains(&self.discount) {
            return Err(format!(
                "discount {} outside [0, {}]",
                self.discount, MAX_DISCOUNT
            ));
        }

        Ok(())
    }

    /// Checks the numeric invariants: sales is finite and positive, profit
    /// is finite.
    pub fn check_amounts(&self) -> Result<(), String> {
        if !(self.sales.is_finite() && self.sales > 0.0) {
            return Err(format!("sales {} is not positive", self.sales));
        }
        if !self.profit.is_finite() {
            return Err(format!("profit {} is not finite", self.profit));
        }
        Ok(())
    }

    /// Renders the 16 raw fields as text cells in column order.
    pub fn to_cells(&self, decimals: usize) -> Vec<String> {
        vec![
            self.order_id.clone(),
            self.order_date.format(DATE_FORMAT).to_string(),
            self.ship_date.format(DATE_FORMAT).to_string(),
            self.ship_mode.to_string(),
            self.customer_name.clone(),
            self.segment.to_string(),
            self.city.clone(),
            self.state.clone(),
            self.region.to_string(),
            self.category.to_string(),
            self.sub_category.clone(),
            self.product_name.clone(),
            format!("{:.*}", decimals, self.sales),
            self.quantity.to_string(),
            format!("{:.*}", decimals, self.discount),
            format!("{:.*}", decimals, self.profit),
        ]
    }
}

/// Fields computed from a single raw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub year_quarter: String,
    pub month_name: String,
    pub day_of_week: String,
    pub ship_duration_days: i64,
    /// `None` when sales is zero.
    pub profit_margin: Option<f64>,
    pub revenue_per_unit: f64,
}

impl DerivedFields {
    /// Renders the 9 derived fields as text cells in column order. An
    /// undefined profit margin becomes an empty cell.
    pub fn to_cells(&self, decimals: usize) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.month.to_string(),
            self.quarter.to_string(),
            self.year_quarter.clone(),
            self.month_name.clone(),
            self.day_of_week.clone(),
            self.ship_duration_days.to_string(),
            self.profit_margin
                .map(|m| format!("{:.*}", decimals, m))
                .unwrap_or_default(),
            format!("{:.*}", decimals, self.revenue_per_unit),
        ]
    }
}

/// A raw order plus its derived fields. Built once by the cleaning stage and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedOrder {
    pub raw: RawOrder,
    pub derived: DerivedFields,
}

impl CleanedOrder {
    /// All 25 cells, raw columns first. Raw money fields use
    /// `raw_decimals`, the derived ratios `ratio_decimals`.
    pub fn to_cells(&self, raw_decimals: usize, ratio_decimals: usize) -> Vec<String> {
        let mut cells = self.raw.to_cells(raw_decimals);
        cells.extend(self.derived.to_cells(ratio_decimals));
        cells
    }
}

/// Header row of the cleaned dataset.
pub fn cleaned_columns() -> Vec<&'static str> {
    RAW_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()).copied().collect()
}
