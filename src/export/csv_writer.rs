//! CSV export of raw and cleaned datasets.
//!
//! One header row, one row per order, dates as `YYYY-MM-DD`, money and
//! ratio fields with a fixed number of decimals. An undefined profit margin
//! is written as an empty cell.

use std::io::Write;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::ExportError;
use crate::records::{cleaned_columns, CleanedOrder, RawOrder, RAW_COLUMNS, RAW_DECIMALS};

/// Write a raw dataset as CSV to any writer.
pub fn write_raw_csv<W: Write>(
    dataset: &Dataset<RawOrder>,
    writer: W,
    decimals: usize,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(RAW_COLUMNS)?;
    for order in dataset {
        csv_writer.write_record(order.to_cells(decimals))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a cleaned dataset as CSV to any writer.
///
/// `decimals` applies to the derived ratios only; the raw columns keep
/// [`RAW_DECIMALS`] so they match the raw export row for row.
pub fn write_cleaned_csv<W: Write>(
    dataset: &Dataset<CleanedOrder>,
    writer: W,
    decimals: usize,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(cleaned_columns())?;
    for order in dataset {
        csv_writer.write_record(order.to_cells(RAW_DECIMALS, decimals))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a raw dataset to a CSV file, creating parent directories.
pub fn write_raw_csv_file(
    dataset: &Dataset<RawOrder>,
    path: &Path,
    decimals: usize,
) -> Result<(), ExportError> {
    let file = create_file(path)?;
    write_raw_csv(dataset, file, decimals)?;
    tracing::info!(path = %path.display(), rows = dataset.len(), "Raw CSV written");
    Ok(())
}

/// Write a cleaned dataset to a CSV file, creating parent directories.
pub fn write_cleaned_csv_file(
    dataset: &Dataset<CleanedOrder>,
    path: &Path,
    decimals: usize,
) -> Result<(), ExportError> {
    let file = create_file(path)?;
    write_cleaned_csv(dataset, file, decimals)?;
    tracing::info!(path = %path.display(), rows = dataset.len(), "Cleaned CSV written");
    Ok(())
}

fn create_file(path: &Path) -> Result<std::io::BufWriter<std::fs::File>, ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::io::BufWriter::new(std::fs::File::create(path)?))
}
