//! Dataset container and assembly.
//!
//! A [`Dataset`] is an ordered, read-only sequence of uniformly shaped
//! records. Ownership moves forward through the stages: the generator owns
//! the raw dataset until it is handed to the [`DatasetAssembler`], which
//! consumes it and produces the cleaned dataset.

pub mod assembler;
pub mod loader;
pub mod summary;

pub use assembler::{AssembledDataset, AssemblerConfig, DatasetAssembler};
pub use loader::{load_raw, load_raw_file};
pub use summary::{CleanedSummary, RawSummary};

use std::ops::Index;

/// Ordered, immutable sequence of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    records: Vec<T>,
}

impl<T> Dataset<T> {
    /// Wraps records in their current order.
    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gives up the records, ending this dataset's ownership of them.
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> Index<usize> for Dataset<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.records[index]
    }
}

impl<'a, T> IntoIterator for &'a Dataset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
