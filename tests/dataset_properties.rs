//! End-to-end properties of generated and cleaned datasets.
//!
//! These tests only use the public API: generate with a fixed seed, clean,
//! and check the invariants a consumer relies on.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use sales_forge::catalog::{self, Category, Region, Segment, ShipMode};
use sales_forge::{
    AnomalyPolicy, AssemblerConfig, Dataset, DatasetAssembler, GeneratorConfig, RawOrder,
    RecordGenerator,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn generate(config: GeneratorConfig) -> Dataset<RawOrder> {
    RecordGenerator::new(config)
        .expect("valid config")
        .generate()
        .expect("generation should succeed")
}

fn order(sales: f64, quantity: u32, profit: f64) -> RawOrder {
    RawOrder {
        order_id: "ORD-2024-00042".to_string(),
        order_date: date(2024, 3, 15),
        ship_date: date(2024, 3, 18),
        ship_mode: ShipMode::SecondClass,
        customer_name: "James Johnson".to_string(),
        segment: Segment::Corporate,
        city: "Chicago".to_string(),
        state: "Illinois".to_string(),
        region: Region::Central,
        category: Category::Technology,
        sub_category: "Laptops".to_string(),
        product_name: "ThinkPad X1 Carbon".to_string(),
        sales,
        quantity,
        discount: 0.0,
        profit,
    }
}

#[test]
fn test_generated_records_satisfy_invariants() {
    let raw = generate(GeneratorConfig {
        record_count: 5_000,
        ..Default::default()
    });
    assert_eq!(raw.len(), 5_000);

    let ids: HashSet<&str> = raw.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids.len(), raw.len());

    for record in &raw {
        assert!((0.0..=0.40).contains(&record.discount));
        assert!(record.quantity >= 1);
        assert!(record.sales > 0.0);
        assert!(record.ship_date >= record.order_date);
        assert!(record.order_date >= date(2023, 1, 1));
        assert!(record.order_date <= date(2025, 12, 31));
        assert_eq!(catalog::region_for_city(&record.city), Some(record.region));
        let sub = catalog::sub_category(&record.sub_category).expect("known sub-category");
        assert_eq!(sub.category, record.category);
    }
}

#[test]
fn test_every_region_and_category_appears() {
    let raw = generate(GeneratorConfig {
        record_count: 2_000,
        ..Default::default()
    });
    let regions: HashSet<Region> = raw.iter().map(|r| r.region).collect();
    let categories: HashSet<Category> = raw.iter().map(|r| r.category).collect();
    assert_eq!(regions.len(), 4);
    assert_eq!(categories.len(), 3);
}

#[test]
fn test_negative_profit_occurs() {
    let raw = generate(GeneratorConfig {
        record_count: 5_000,
        ..Default::default()
    });
    assert!(raw.iter().any(|r| r.profit < 0.0));
}

#[test]
fn test_fourth_quarter_is_denser() {
    let raw = generate(GeneratorConfig {
        record_count: 20_000,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        ..Default::default()
    });

    let mut per_month: BTreeMap<u32, usize> = BTreeMap::new();
    for record in &raw {
        *per_month.entry(record.order_date.month()).or_default() += 1;
    }
    let q4: usize = (10..=12).map(|m| per_month.get(&m).copied().unwrap_or(0)).sum();
    let rest: usize = (1..=9).map(|m| per_month.get(&m).copied().unwrap_or(0)).sum();
    let q4_avg = q4 as f64 / 3.0;
    let rest_avg = rest as f64 / 9.0;

    assert!(
        q4_avg > 1.4 * rest_avg,
        "Q4 monthly average {} vs {}",
        q4_avg,
        rest_avg
    );
}

#[test]
fn test_generation_is_deterministic_per_seed_and_workers() {
    let config = GeneratorConfig {
        record_count: 1_500,
        workers: 3,
        ..Default::default()
    };
    assert_eq!(generate(config.clone()), generate(config));
}

#[test]
fn test_parallel_ids_are_unique() {
    let raw = generate(GeneratorConfig {
        record_count: 3_001,
        workers: 4,
        ..Default::default()
    });
    let ids: HashSet<&str> = raw.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids.len(), 3_001);
}

#[test]
fn test_cleaning_preserves_rows_and_order() {
    let raw = generate(GeneratorConfig {
        record_count: 3_000,
        ..Default::default()
    });
    let assembled = DatasetAssembler::new(AssemblerConfig {
        batch_size: 256,
        parallel: true,
        ..Default::default()
    })
    .assemble(raw.clone());

    assert_eq!(assembled.report.excluded_rows, 0);
    assert_eq!(assembled.dataset.len(), raw.len());
    for (cleaned, original) in assembled.dataset.iter().zip(raw.iter()) {
        assert_eq!(&cleaned.raw, original);
        let d = &cleaned.derived;
        assert_eq!(d.year, original.order_date.year());
        assert_eq!(d.quarter, (original.order_date.month() - 1) / 3 + 1);
        assert_eq!(d.year_quarter, format!("{}-Q{}", d.year, d.quarter));
        assert_eq!(
            d.ship_duration_days,
            (original.ship_date - original.order_date).num_days()
        );
        assert!(d.ship_duration_days >= 0);
        let margin = d.profit_margin.expect("sales are positive");
        assert!(margin.is_finite());
        assert!(d.revenue_per_unit.is_finite());
    }
}

#[test]
fn test_cleaning_is_deterministic() {
    let raw = generate(GeneratorConfig {
        record_count: 1_000,
        ..Default::default()
    });
    let first = DatasetAssembler::default().assemble(raw.clone());
    let second = DatasetAssembler::default().assemble(raw);
    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first.report, second.report);
}

#[test]
fn test_typical_order_derivation() {
    let assembled =
        DatasetAssembler::default().assemble(Dataset::from_records(vec![order(1199.00, 3, 239.80)]));
    let d = &assembled.dataset[0].derived;
    assert_eq!(d.year, 2024);
    assert_eq!(d.month, 3);
    assert_eq!(d.quarter, 1);
    assert_eq!(d.year_quarter, "2024-Q1");
    assert_eq!(d.month_name, "March");
    assert_eq!(d.day_of_week, "Friday");
    assert_eq!(d.ship_duration_days, 3);
    assert_eq!(d.profit_margin, Some(20.0));
    assert_eq!(d.revenue_per_unit, 399.67);
}

#[test]
fn test_loss_making_order_derivation() {
    let assembled =
        DatasetAssembler::default().assemble(Dataset::from_records(vec![order(100.00, 1, -15.17)]));
    let d = &assembled.dataset[0].derived;
    assert_eq!(d.profit_margin, Some(-15.17));
    assert_eq!(d.revenue_per_unit, 100.0);
}

#[test]
fn test_zero_sales_margin_is_undefined() {
    let assembled =
        DatasetAssembler::default().assemble(Dataset::from_records(vec![order(0.0, 2, 0.0)]));
    assert_eq!(assembled.dataset.len(), 1);
    assert_eq!(assembled.dataset[0].derived.profit_margin, None);
}

#[test]
fn test_anomaly_policies_apply_uniformly() {
    let mut early_ship = order(500.0, 2, 50.0);
    early_ship.order_id = "ORD-2024-00001".to_string();
    early_ship.ship_date = date(2024, 3, 10);
    let mut zero_quantity = order(500.0, 0, 50.0);
    zero_quantity.order_id = "ORD-2024-00002".to_string();
    let mut good = order(500.0, 2, 50.0);
    good.order_id = "ORD-2024-00003".to_string();
    let records = vec![early_ship, zero_quantity, good];

    let excluded = DatasetAssembler::default().assemble(Dataset::from_records(records.clone()));
    assert_eq!(excluded.dataset.len(), 1);
    assert_eq!(excluded.report.excluded_rows, 2);
    assert_eq!(excluded.dataset[0].raw.order_id, "ORD-2024-00003");

    let clamped = DatasetAssembler::new(AssemblerConfig {
        policy: AnomalyPolicy::Clamp,
        ..Default::default()
    })
    .assemble(Dataset::from_records(records));
    assert_eq!(clamped.dataset.len(), 3);
    assert_eq!(clamped.report.corrected_rows, 2);
    assert_eq!(clamped.dataset[0].derived.ship_duration_days, 0);
    assert_eq!(clamped.dataset[1].raw.quantity, 1);
    assert_eq!(clamped.dataset[1].derived.revenue_per_unit, 500.0);
}
