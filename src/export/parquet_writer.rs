//! Parquet writer for the cleaned sales dataset.
//!
//! Produces one Parquet file with the 16 raw columns followed by the 9
//! derived columns. Dates are Arrow `Date32`; an undefined profit margin is
//! a null.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Date32Builder, Float64Builder, Int32Builder, Int64Builder, StringBuilder,
    UInt32Builder,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::dataset::Dataset;
use crate::error::ExportError;
use crate::records::{CleanedOrder, DERIVED_COLUMNS, RAW_COLUMNS};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Arrow schema of the cleaned dataset, in column order.
pub fn sales_schema() -> Schema {
    let raw_types = [
        DataType::Utf8,
        DataType::Date32,
        DataType::Date32,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Float64,
        DataType::UInt32,
        DataType::Float64,
        DataType::Float64,
    ];
    let derived_types = [
        DataType::Int32,
        DataType::UInt32,
        DataType::UInt32,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Int64,
        DataType::Float64,
        DataType::Float64,
    ];

    let mut fields: Vec<Field> = RAW_COLUMNS
        .iter()
        .zip(raw_types)
        .map(|(name, data_type)| Field::new(*name, data_type, false))
        .collect();
    fields.extend(
        DERIVED_COLUMNS
            .iter()
            .zip(derived_types)
            .map(|(name, data_type)| Field::new(*name, data_type, *name == "Profit_Margin")),
    );
    Schema::new(fields)
}

fn date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Convert cleaned orders into an Arrow RecordBatch.
pub fn orders_to_record_batch(orders: &[CleanedOrder]) -> Result<RecordBatch, ExportError> {
    let schema = Arc::new(sales_schema());

    let mut order_id = StringBuilder::new();
    let mut order_date = Date32Builder::new();
    let mut ship_date = Date32Builder::new();
    let mut ship_mode = StringBuilder::new();
    let mut customer_name = StringBuilder::new();
    let mut segment = StringBuilder::new();
    let mut city = StringBuilder::new();
    let mut state = StringBuilder::new();
    let mut region = StringBuilder::new();
    let mut category = StringBuilder::new();
    let mut sub_category = StringBuilder::new();
    let mut product_name = StringBuilder::new();
    let mut sales = Float64Builder::new();
    let mut quantity = UInt32Builder::new();
    let mut discount = Float64Builder::new();
    let mut profit = Float64Builder::new();

    let mut year = Int32Builder::new();
    let mut month = UInt32Builder::new();
    let mut quarter = UInt32Builder::new();
    let mut year_quarter = StringBuilder::new();
    let mut month_name = StringBuilder::new();
    let mut day_of_week = StringBuilder::new();
    let mut ship_duration_days = Int64Builder::new();
    let mut profit_margin = Float64Builder::new();
    let mut revenue_per_unit = Float64Builder::new();

    for order in orders {
        let raw = &order.raw;
        order_id.append_value(&raw.order_id);
        order_date.append_value(date32(raw.order_date));
        ship_date.append_value(date32(raw.ship_date));
        ship_mode.append_value(raw.ship_mode.as_str());
        customer_name.append_value(&raw.customer_name);
        segment.append_value(raw.segment.as_str());
        city.append_value(&raw.city);
        state.append_value(&raw.state);
        region.append_value(raw.region.as_str());
        category.append_value(raw.category.as_str());
        sub_category.append_value(&raw.sub_category);
        product_name.append_value(&raw.product_name);
        sales.append_value(raw.sales);
        quantity.append_value(raw.quantity);
        discount.append_value(raw.discount);
        profit.append_value(raw.profit);

        let derived = &order.derived;
        year.append_value(derived.year);
        month.append_value(derived.month);
        quarter.append_value(derived.quarter);
        year_quarter.append_value(&derived.year_quarter);
        month_name.append_value(&derived.month_name);
        day_of_week.append_value(&derived.day_of_week);
        ship_duration_days.append_value(derived.ship_duration_days);
        profit_margin.append_option(derived.profit_margin);
        revenue_per_unit.append_value(derived.revenue_per_unit);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(order_id.finish()),
        Arc::new(order_date.finish()),
        Arc::new(ship_date.finish()),
        Arc::new(ship_mode.finish()),
        Arc::new(customer_name.finish()),
        Arc::new(segment.finish()),
        Arc::new(city.finish()),
        Arc::new(state.finish()),
        Arc::new(region.finish()),
        Arc::new(category.finish()),
        Arc::new(sub_category.finish()),
        Arc::new(product_name.finish()),
        Arc::new(sales.finish()),
        Arc::new(quantity.finish()),
        Arc::new(discount.finish()),
        Arc::new(profit.finish()),
        Arc::new(year.finish()),
        Arc::new(month.finish()),
        Arc::new(quarter.finish()),
        Arc::new(year_quarter.finish()),
        Arc::new(month_name.finish()),
        Arc::new(day_of_week.finish()),
        Arc::new(ship_duration_days.finish()),
        Arc::new(profit_margin.finish()),
        Arc::new(revenue_per_unit.finish()),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::ZSTD(Default::default()))
        .build()
}

/// Encodes the dataset into `sink`. An empty dataset yields a file with
/// the full schema and no row groups.
fn write_batch<W: std::io::Write + Send>(
    dataset: &Dataset<CleanedOrder>,
    sink: W,
) -> Result<(), ExportError> {
    let batch = orders_to_record_batch(dataset.records())?;
    let mut writer = ArrowWriter::try_new(sink, batch.schema(), Some(writer_properties()))?;
    if batch.num_rows() > 0 {
        writer.write(&batch)?;
    }
    writer.close()?;
    Ok(())
}

/// Write a cleaned dataset to a Parquet file on disk.
pub fn write_parquet(
    dataset: &Dataset<CleanedOrder>,
    output_path: &Path,
) -> Result<(), ExportError> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(output_path)?;
    write_batch(dataset, file)?;

    tracing::info!(
        path = %output_path.display(),
        rows = dataset.len(),
        "Parquet file written"
    );

    Ok(())
}

/// Write a cleaned dataset to Parquet bytes in memory.
pub fn write_parquet_bytes(dataset: &Dataset<CleanedOrder>) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_batch(dataset, &mut buf)?;
    Ok(buf)
}
