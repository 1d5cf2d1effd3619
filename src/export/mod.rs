//! Export of generated and cleaned datasets.
//!
//! CSV for both raw and cleaned records, Parquet for the cleaned dataset,
//! and a JSON summary of the run.

pub mod csv_writer;
pub mod parquet_writer;
pub mod summary_file;

pub use csv_writer::{write_cleaned_csv, write_cleaned_csv_file, write_raw_csv, write_raw_csv_file};
pub use parquet_writer::{orders_to_record_batch, sales_schema, write_parquet, write_parquet_bytes};
pub use summary_file::{read_summary_json, write_summary_json, RunSummary};
