//! Static distribution tables for sales record generation.
//!
//! The catalog is immutable and built at compile time: regions and their
//! cities, the category → sub-category → product tree, and the weighted
//! choice tables for segment, ship mode, quantity and discount.
//!
//! A malformed table is a build defect, so nothing here returns an error.
//! The unit tests pin the shape of every table.

mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use tables::{
    CITIES, DISCOUNT_LEVELS, FIRST_NAMES, LAST_NAMES, QUANTITY_WEIGHTS, SEGMENT_WEIGHTS,
    SHIP_MODE_WEIGHTS, SUB_CATEGORIES,
};

/// Sales region. Every city belongs to exactly one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    East,
    West,
    Central,
    South,
}

impl Region {
    pub fn all() -> [Region; 4] {
        [Region::East, Region::West, Region::Central, Region::South]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
            Region::South => "South",
        }
    }

    /// Cities belonging to this region, in table order.
    pub fn cities(&self) -> impl Iterator<Item = &'static CityInfo> + '_ {
        CITIES.iter().filter(move |c| c.region == *self)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Consumer,
    Corporate,
    #[serde(rename = "Home Office")]
    HomeOffice,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Consumer => "Consumer",
            Segment::Corporate => "Corporate",
            Segment::HomeOffice => "Home Office",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipMode {
    #[serde(rename = "Standard Class")]
    StandardClass,
    #[serde(rename = "Second Class")]
    SecondClass,
    #[serde(rename = "First Class")]
    FirstClass,
    #[serde(rename = "Same Day")]
    SameDay,
}

impl ShipMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipMode::StandardClass => "Standard Class",
            ShipMode::SecondClass => "Second Class",
            ShipMode::FirstClass => "First Class",
            ShipMode::SameDay => "Same Day",
        }
    }

    /// Shipping delay profile: the shortest delay in days and the weight of
    /// each consecutive delay starting there.
    ///
    /// Faster modes put their mass on shorter delays.
    pub fn delay_profile(&self) -> DelayProfile {
        match self {
            ShipMode::SameDay => DelayProfile {
                min_days: 0,
                weights: &[0.70, 0.30],
            },
            ShipMode::FirstClass => DelayProfile {
                min_days: 1,
                weights: &[0.40, 0.40, 0.20],
            },
            ShipMode::SecondClass => DelayProfile {
                min_days: 2,
                weights: &[0.20, 0.35, 0.30, 0.15],
            },
            ShipMode::StandardClass => DelayProfile {
                min_days: 3,
                weights: &[0.20, 0.30, 0.25, 0.15, 0.10],
            },
        }
    }
}

impl fmt::Display for ShipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted range of shipping delays for a ship mode.
#[derive(Debug, Clone, Copy)]
pub struct DelayProfile {
    pub min_days: i64,
    pub weights: &'static [f64],
}

impl DelayProfile {
    /// Longest delay this profile can produce.
    pub fn max_days(&self) -> i64 {
        self.min_days + self.weights.len() as i64 - 1
    }

    /// Delay values paired with their weights.
    pub fn entries(&self) -> Vec<(i64, f64)> {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, w)| (self.min_days + i as i64, *w))
            .collect()
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Furniture,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
}

impl Category {
    pub fn all() -> [Category; 3] {
        [
            Category::Technology,
            Category::Furniture,
            Category::OfficeSupplies,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Furniture => "Furniture",
            Category::OfficeSupplies => "Office Supplies",
        }
    }

    /// Base profit margin range `(min, max)` before the discount squeeze.
    pub fn margin_range(&self) -> (f64, f64) {
        match self {
            Category::Technology => (0.10, 0.35),
            Category::Furniture => (-0.05, 0.25),
            Category::OfficeSupplies => (0.15, 0.50),
        }
    }

    /// Sub-categories of this category, in table order.
    pub fn sub_categories(&self) -> impl Iterator<Item = &'static SubCategoryInfo> + '_ {
        SUB_CATEGORIES.iter().filter(move |s| s.category == *self)
    }

    /// Lowest and highest list price across this category's products.
    pub fn price_range(&self) -> (f64, f64) {
        self.sub_categories()
            .flat_map(|s| s.products.iter())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.base_price), hi.max(p.base_price))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A city with its state and region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityInfo {
    pub name: &'static str,
    pub state: &'static str,
    pub region: Region,
}

/// A sellable product and its list price in dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductInfo {
    pub name: &'static str,
    pub base_price: f64,
}

/// A sub-category, its parent category and its products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubCategoryInfo {
    pub name: &'static str,
    pub category: Category,
    pub products: &'static [ProductInfo],
}

/// Looks up a city by name.
pub fn city(name: &str) -> Option<&'static CityInfo> {
    CITIES.iter().find(|c| c.name == name)
}

/// Region a city belongs to.
pub fn region_for_city(name: &str) -> Option<Region> {
    city(name).map(|c| c.region)
}

/// Looks up a sub-category by name.
pub fn sub_category(name: &str) -> Option<&'static SubCategoryInfo> {
    SUB_CATEGORIES.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn weight_sum(weights: impl Iterator<Item = f64>) -> f64 {
        weights.sum()
    }

    #[test]
    fn test_ten_cities_per_region() {
        for region in Region::all() {
            assert_eq!(region.cities().count(), 10, "region {}", region);
        }
        assert_eq!(CITIES.len(), 40);
    }

    #[test]
    fn test_city_names_unique() {
        let names: HashSet<_> = CITIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CITIES.len());
    }

    #[test]
    fn test_region_lookup() {
        assert_eq!(region_for_city("Chicago"), Some(Region::Central));
        assert_eq!(region_for_city("Miami"), Some(Region::East));
        assert_eq!(region_for_city("Seattle"), Some(Region::West));
        assert_eq!(region_for_city("Nashville"), Some(Region::South));
        assert_eq!(region_for_city("Gotham"), None);
    }

    #[test]
    fn test_state_for_shared_city_names() {
        assert_eq!(city("Washington").map(|c| c.state), Some("District of Columbia"));
        assert_eq!(city("Portland").map(|c| c.state), Some("Oregon"));
    }

    #[test]
    fn test_four_sub_categories_per_category() {
        for category in Category::all() {
            let subs: Vec<_> = category.sub_categories().collect();
            assert_eq!(subs.len(), 4, "category {}", category);
            for sub in subs {
                assert_eq!(sub.products.len(), 4, "sub-category {}", sub.name);
            }
        }
    }

    #[test]
    fn test_sub_category_names_unique() {
        let names: HashSet<_> = SUB_CATEGORIES.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), SUB_CATEGORIES.len());
    }

    #[test]
    fn test_weights_sum_to_one() {
        let segments = weight_sum(SEGMENT_WEIGHTS.iter().map(|(_, w)| *w));
        let modes = weight_sum(SHIP_MODE_WEIGHTS.iter().map(|(_, w)| *w));
        let quantities = weight_sum(QUANTITY_WEIGHTS.iter().map(|(_, w)| *w));
        let discounts = weight_sum(DISCOUNT_LEVELS.iter().map(|(_, w)| *w));

        for total in [segments, modes, quantities, discounts] {
            assert!((total - 1.0).abs() < 1e-9, "weights sum to {}", total);
        }
    }

    #[test]
    fn test_delay_profiles_are_normalized_and_ordered() {
        let modes = [
            ShipMode::SameDay,
            ShipMode::FirstClass,
            ShipMode::SecondClass,
            ShipMode::StandardClass,
        ];
        let mut previous_max = -1;
        for mode in modes {
            let profile = mode.delay_profile();
            let total: f64 = profile.weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
            assert!(profile.min_days >= 0);
            assert!(profile.max_days() <= 7);
            assert!(profile.max_days() > previous_max);
            previous_max = profile.max_days();
        }
    }

    #[test]
    fn test_discount_levels_in_range() {
        for (level, _) in DISCOUNT_LEVELS {
            assert!((0.0..=0.40).contains(&level));
        }
    }

    #[test]
    fn test_price_range() {
        let (lo, hi) = Category::OfficeSupplies.price_range();
        assert_eq!(lo, 12.0);
        assert_eq!(hi, 49.0);
        let (lo, hi) = Category::Technology.price_range();
        assert_eq!(lo, 49.0);
        assert_eq!(hi, 1399.0);
    }

    #[test]
    fn test_display_names_match_serde() {
        let json = serde_json::to_string(&ShipMode::StandardClass).expect("serialize");
        assert_eq!(json, format!("\"{}\"", ShipMode::StandardClass));
        let json = serde_json::to_string(&Category::OfficeSupplies).expect("serialize");
        assert_eq!(json, format!("\"{}\"", Category::OfficeSupplies));
        let json = serde_json::to_string(&Segment::HomeOffice).expect("serialize");
        assert_eq!(json, format!("\"{}\"", Segment::HomeOffice));
    }
}
