//! CSV loader for raw datasets.
//!
//! Expects the 16 raw columns with a header row. Every row is checked
//! against the catalog and amount invariants and order ids must be unique; any
//! violation fails the whole load. Temporal and quantity anomalies are left
//! for the cleaning stage.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::Dataset;
use crate::error::DatasetError;
use crate::records::RawOrder;

/// Load a raw dataset from a CSV reader.
pub fn load_raw<R: Read>(reader: R) -> Result<Dataset<RawOrder>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for (index, result) in csv_reader.deserialize().enumerate() {
        let row = index + 1;
        let record: RawOrder = result?;

        record
            .check_catalog()
            .and_then(|()| record.check_amounts())
            .map_err(|reason| DatasetError::InvalidRecord {
                row,
                order_id: record.order_id.clone(),
                reason,
            })?;

        if !seen.insert(record.order_id.clone()) {
            return Err(DatasetError::DuplicateOrderId {
                row,
                order_id: record.order_id,
            });
        }

        records.push(record);
    }

    tracing::info!(rows = records.len(), "Loaded raw dataset");
    Ok(Dataset::from_records(records))
}

/// Load a raw dataset from a CSV file path.
pub fn load_raw_file(path: &Path) -> Result<Dataset<RawOrder>, DatasetError> {
    let file = std::fs::File::open(path)?;
    load_raw(std::io::BufReader::new(file))
}
