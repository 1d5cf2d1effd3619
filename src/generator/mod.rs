//! Synthetic sales record generation.
//!
//! The generator draws every field of a [`RawOrder`] from the static
//! [`catalog`](crate::catalog) tables:
//!
//! 1. **Location** - a city uniformly across all 40; state and region come
//!    from the city's table entry and are never sampled on their own
//! 2. **Customer** - segment by weight, name from fixed name lists
//! 3. **Product** - category, then sub-category, then product, all uniform
//! 4. **Dates** - order date by seasonal weight, ship delay by ship mode
//! 5. **Financials** - quantity and discount by weight, sales from the
//!    product's list price, profit from the category margin range
//!
//! Every record is checked against the raw invariants before it is emitted.
//!
//! # Example
//!
//! ```ignore
//! use sales_forge::generator::{GeneratorConfig, RecordGenerator};
//!
//! let generator = RecordGenerator::new(GeneratorConfig::default())?;
//! let raw = generator.generate()?;
//! assert_eq!(raw.len(), 10_000);
//! ```

pub mod ids;
pub mod sampler;
pub mod seasonal;

pub use ids::{format_order_id, partition, IdPartition};
pub use sampler::WeightedTable;
pub use seasonal::{seasonal_weight, HOLIDAY_BOOST};

use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{
    Category, ShipMode, SubCategoryInfo, CITIES, DISCOUNT_LEVELS, FIRST_NAMES, LAST_NAMES,
    QUANTITY_WEIGHTS, SEGMENT_WEIGHTS, SHIP_MODE_WEIGHTS,
};
use crate::dataset::Dataset;
use crate::error::GeneratorError;
use crate::records::RawOrder;
use crate::utils::round_to;
use sampler::pick;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Lowest and highest unit price multiplier applied to a list price.
pub const PRICE_JITTER_BOUNDS: (f64, f64) = (0.85, 1.15);

/// Standard deviation of the unit price multiplier around 1.0.
const PRICE_JITTER_STD_DEV: f64 = 0.05;

/// Margin points lost per unit of discount.
const DISCOUNT_MARGIN_SQUEEZE: f64 = 0.5;

/// Smallest sales value a record may carry.
const MIN_SALES: f64 = 0.01;

/// Golden-ratio increment used to spread partition seeds.
const PARTITION_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};

const DEFAULT_END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 12, 31) {
    Some(date) => date,
    None => panic!("invalid default end date"),
};

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of records to generate.
    pub record_count: usize,
    /// First possible order date.
    pub start_date: NaiveDate,
    /// Last possible order date.
    pub end_date: NaiveDate,
    /// RNG seed. The same seed and worker count give the same dataset.
    pub seed: u64,
    /// Number of generation partitions run in parallel.
    pub workers: usize,
    /// Stable-sort the raw dataset by order date after generation.
    pub chronological: bool,
    /// Prefix of every order id.
    pub id_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: 10_000,
            start_date: DEFAULT_START_DATE,
            end_date: DEFAULT_END_DATE,
            seed: 42,
            workers: 1,
            chronological: true,
            id_prefix: "ORD".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Checks the settings before any sampling table is built.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(GeneratorError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.record_count == 0 {
            return Err(GeneratorError::InvalidParameter(
                "record_count must be greater than 0".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(GeneratorError::InvalidParameter(
                "workers must be greater than 0".to_string(),
            ));
        }
        if self.id_prefix.trim().is_empty() {
            return Err(GeneratorError::InvalidParameter(
                "id_prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Sampling tables built once per generator and shared read-only by workers.
#[derive(Debug, Clone)]
struct SamplingTables {
    dates: WeightedTable<NaiveDate>,
    segments: WeightedTable<crate::catalog::Segment>,
    ship_modes: WeightedTable<ShipMode>,
    same_day_delays: WeightedTable<i64>,
    first_class_delays: WeightedTable<i64>,
    second_class_delays: WeightedTable<i64>,
    standard_delays: WeightedTable<i64>,
    quantities: WeightedTable<u32>,
    discounts: WeightedTable<f64>,
    categories: Vec<(Category, Vec<&'static SubCategoryInfo>)>,
    price_jitter: Normal<f64>,
}

impl SamplingTables {
    fn build(config: &GeneratorConfig) -> Result<Self> {
        let delays = |mode: ShipMode| WeightedTable::new(&mode.delay_profile().entries());

        let categories = Category::all()
            .into_iter()
            .map(|c| (c, c.sub_categories().collect()))
            .collect();

        let price_jitter = Normal::new(1.0, PRICE_JITTER_STD_DEV)
            .map_err(|e| GeneratorError::InvalidParameter(e.to_string()))?;

        Ok(Self {
            dates: WeightedTable::new(&seasonal::weighted_days(
                config.start_date,
                config.end_date,
            ))?,
            segments: WeightedTable::new(&SEGMENT_WEIGHTS)?,
            ship_modes: WeightedTable::new(&SHIP_MODE_WEIGHTS)?,
            same_day_delays: delays(ShipMode::SameDay)?,
            first_class_delays: delays(ShipMode::FirstClass)?,
            second_class_delays: delays(ShipMode::SecondClass)?,
            standard_delays: delays(ShipMode::StandardClass)?,
            quantities: WeightedTable::new(&QUANTITY_WEIGHTS)?,
            discounts: WeightedTable::new(&DISCOUNT_LEVELS)?,
            categories,
            price_jitter,
        })
    }

    fn delays(&self, mode: ShipMode) -> &WeightedTable<i64> {
        match mode {
            ShipMode::SameDay => &self.same_day_delays,
            ShipMode::FirstClass => &self.first_class_delays,
            ShipMode::SecondClass => &self.second_class_delays,
            ShipMode::StandardClass => &self.standard_delays,
        }
    }
}

/// Deterministic generator of raw sales records.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    config: GeneratorConfig,
    tables: SamplingTables,
}

impl RecordGenerator {
    /// Validates the configuration and builds the sampling tables.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let tables = SamplingTables::build(&config)?;
        Ok(Self { config, tables })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the full raw dataset.
    ///
    /// The run is split into id partitions, one per worker, each with its
    /// own RNG stream. With more than one worker the partitions run on a
    /// dedicated rayon pool; partition results are concatenated in order.
    pub fn generate(&self) -> Result<Dataset<RawOrder>> {
        let partitions = partition(self.config.record_count, self.config.workers);
        info!(
            records = self.config.record_count,
            partitions = partitions.len(),
            seed = self.config.seed,
            start = %self.config.start_date,
            end = %self.config.end_date,
            "Generating raw sales records"
        );

        let chunks: Vec<Vec<RawOrder>> = if partitions.len() == 1 {
            partitions
                .iter()
                .map(|p| self.generate_partition(p))
                .collect::<Result<_>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(partitions.len())
                .build()
                .map_err(|e| GeneratorError::InvalidParameter(e.to_string()))?;
            pool.install(|| {
                partitions
                    .par_iter()
                    .map(|p| self.generate_partition(p))
                    .collect::<Result<_>>()
            })?
        };

        let mut records: Vec<RawOrder> = chunks.into_iter().flatten().collect();
        if self.config.chronological {
            records.sort_by_key(|r| r.order_date);
        }

        Ok(Dataset::from_records(records))
    }

    /// Generates the records of one id partition.
    pub fn generate_partition(&self, partition: &IdPartition) -> Result<Vec<RawOrder>> {
        let seed = partition_seed(self.config.seed, partition.index);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        debug!(
            partition = partition.index,
            first_sequence = partition.first_sequence,
            len = partition.len,
            "Generating partition"
        );

        partition
            .sequences()
            .map(|sequence| self.generate_record(&mut rng, sequence))
            .collect()
    }

    /// Generates one record with the given sequence number.
    pub fn generate_record(&self, rng: &mut ChaCha8Rng, sequence: u64) -> Result<RawOrder> {
        let city = pick(rng, &CITIES);
        let segment = self.tables.segments.sample(rng);
        let customer_name = format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES));

        let (category, sub_categories) = pick(rng, &self.tables.categories);
        let sub_category = *pick(rng, sub_categories);
        let product = pick(rng, sub_category.products);

        let order_date = self.tables.dates.sample(rng);
        let ship_mode = self.tables.ship_modes.sample(rng);
        let delay = self.tables.delays(ship_mode).sample(rng);
        let ship_date = order_date
            .checked_add_signed(Duration::days(delay))
            .ok_or_else(|| {
                GeneratorError::InvalidParameter(format!(
                    "ship date overflows calendar: {} + {} days",
                    order_date, delay
                ))
            })?;

        let quantity = self.tables.quantities.sample(rng);
        let discount = self.tables.discounts.sample(rng);

        let (jitter_lo, jitter_hi) = PRICE_JITTER_BOUNDS;
        let jitter = rng
            .sample(&self.tables.price_jitter)
            .clamp(jitter_lo, jitter_hi);
        let sales = round_to(
            product.base_price * jitter * quantity as f64 * (1.0 - discount),
            2,
        )
        .max(MIN_SALES);

        let (margin_lo, margin_hi) = category.margin_range();
        let margin = rng.random_range(margin_lo..margin_hi) - discount * DISCOUNT_MARGIN_SQUEEZE;
        let profit = round_to(sales * margin, 2);

        let order = RawOrder {
            order_id: format_order_id(&self.config.id_prefix, order_date.year(), sequence),
            order_date,
            ship_date,
            ship_mode,
            customer_name,
            segment,
            city: city.name.to_string(),
            state: city.state.to_string(),
            region: city.region,
            category: *category,
            sub_category: sub_category.name.to_string(),
            product_name: product.name.to_string(),
            sales,
            quantity,
            discount,
            profit,
        };

        self.check_generated(&order)?;
        Ok(order)
    }

    /// Verifies a freshly generated record against every raw invariant.
    fn check_generated(&self, order: &RawOrder) -> Result<()> {
        let violation = |reason: String| GeneratorError::InvariantViolation {
            order_id: order.order_id.clone(),
            reason,
        };

        order.check_catalog().map_err(violation)?;

        if order.order_date < self.config.start_date || order.order_date > self.config.end_date {
            return Err(violation(format!(
                "order date {} outside configured range",
                order.order_date
            )));
        }
        if order.ship_date < order.order_date {
            return Err(violation(format!(
                "ship date {} precedes order date {}",
                order.ship_date, order.order_date
            )));
        }
        if order.quantity < 1 {
            return Err(violation("quantity must be at least 1".to_string()));
        }
        order.check_amounts().map_err(violation)
    }
}

/// RNG seed of a partition. Partition 0 uses the run seed unchanged.
pub fn partition_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(PARTITION_SEED_STEP))
}
