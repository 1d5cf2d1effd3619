//! Weighted sampling for record generation.
//!
//! [`WeightedTable`] turns a static `(value, weight)` table into a cumulative
//! distribution once, then samples it with a binary search. All draws go
//! through a ChaCha8 RNG so a seed fully determines the output.

use crate::error::GeneratorError;
use crate::generator::Result;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Immutable weighted choice over a fixed set of values.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T: Copy> WeightedTable<T> {
    /// Builds a table from `(value, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, a weight is negative or not
    /// finite, or the weights sum to zero.
    pub fn new(entries: &[(T, f64)]) -> Result<Self> {
        if entries.is_empty() {
            return Err(GeneratorError::InvalidParameter(
                "Weighted table cannot be empty".to_string(),
            ));
        }

        let mut values = Vec::with_capacity(entries.len());
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut total = 0.0;

        for (value, weight) in entries {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(GeneratorError::InvalidParameter(format!(
                    "Weights must be finite and non-negative, got {}",
                    weight
                )));
            }
            total += weight;
            values.push(*value);
            cumulative.push(total);
        }

        if total <= 0.0 {
            return Err(GeneratorError::InvalidParameter(
                "Total weight must be positive".to_string(),
            ));
        }

        Ok(Self { values, cumulative })
    }

    /// Draws one value.
    pub fn sample(&self, rng: &mut ChaCha8Rng) -> T {
        let total = self.cumulative[self.cumulative.len() - 1];
        let target = rng.random::<f64>() * total;
        // First bucket whose cumulative weight exceeds the target; zero-weight
        // buckets share their predecessor's bound and are never chosen.
        let index = self
            .cumulative
            .partition_point(|bound| *bound <= target)
            .min(self.values.len() - 1);
        self.values[index]
    }
}

/// Draws a uniformly random element of a non-empty slice.
pub fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}
