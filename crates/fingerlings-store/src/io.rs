//! Parquet and JSON persistence for distribution records.
//!
//! Parquet files follow [`distribution_schema`]. External exports are accepted
//! with a signed `fingerlings_count` and `LargeUtf8` string columns; they are
//! converted on read.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, Date32Array, Float64Array, Int64Array, LargeStringArray, StringArray,
    UInt64Array,
};
use arrow::datatypes::Date32Type;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use fingerlings_core::distribution::{self, distribution_schema};
use fingerlings_core::{DistributionRecord, Location, Species};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::info;

use crate::StoreError;

/// Read every distribution record from a Parquet file.
pub fn read_distributions(path: &Path) -> Result<Vec<DistributionRecord>, StoreError> {
    if !path.exists() {
        return Err(StoreError::ParquetNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        records.extend(batch_to_records(&batch, records.len())?);
    }
    info!(count = records.len(), path = %path.display(), "read distribution records");
    Ok(records)
}

/// Read a JSON array of distribution records.
pub fn read_distributions_json(path: &Path) -> Result<Vec<DistributionRecord>, StoreError> {
    let file = File::open(path)?;
    let records: Vec<DistributionRecord> = serde_json::from_reader(std::io::BufReader::new(file))?;
    info!(count = records.len(), path = %path.display(), "read distribution records");
    Ok(records)
}

/// Write records to a Parquet file, replacing it if present.
pub fn write_distributions(path: &Path, records: &[DistributionRecord]) -> Result<(), StoreError> {
    let batch = records_to_batch(records)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    info!(count = records.len(), path = %path.display(), "wrote distribution records");
    Ok(())
}

fn records_to_batch(records: &[DistributionRecord]) -> Result<RecordBatch, StoreError> {
    let dates: Date32Array = records
        .iter()
        .map(|r| Some(Date32Type::from_naive_date(r.date)))
        .collect();
    let species: StringArray = records.iter().map(|r| Some(r.species.key())).collect();
    let counts: UInt64Array = records.iter().map(|r| Some(r.fingerlings_count)).collect();
    let provinces: StringArray = records.iter().map(|r| Some(r.location.province.as_str())).collect();
    let cities: StringArray = records.iter().map(|r| Some(r.location.city.as_str())).collect();
    let barangays: StringArray = records.iter().map(|r| Some(r.location.barangay.as_str())).collect();
    let weights: Float64Array = records.iter().map(|r| r.actual_harvest_weight_kg).collect();
    let harvest_dates: Date32Array = records
        .iter()
        .map(|r| r.actual_harvest_date.map(Date32Type::from_naive_date))
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(dates),
        Arc::new(species),
        Arc::new(counts),
        Arc::new(provinces),
        Arc::new(cities),
        Arc::new(barangays),
        Arc::new(weights),
        Arc::new(harvest_dates),
    ];
    Ok(RecordBatch::try_new(Arc::new(distribution_schema()), columns)?)
}

// ── Batch decoding ──

fn batch_to_records(batch: &RecordBatch, offset: usize) -> Result<Vec<DistributionRecord>, StoreError> {
    let dates = date_column(batch, distribution::DATE)?;
    let species_col = required_column(batch, distribution::SPECIES)?;
    let counts_col = required_column(batch, distribution::FINGERLINGS_COUNT)?;
    let provinces = batch.column_by_name(distribution::PROVINCE);
    let cities = batch.column_by_name(distribution::CITY);
    let barangays = batch.column_by_name(distribution::BARANGAY);
    let weights = match batch.column_by_name(distribution::ACTUAL_HARVEST_WEIGHT_KG) {
        Some(col) => Some(
            col.as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| type_mismatch(distribution::ACTUAL_HARVEST_WEIGHT_KG, col))?,
        ),
        None => None,
    };
    let harvest_dates = match batch.column_by_name(distribution::ACTUAL_HARVEST_DATE) {
        Some(_) => Some(date_column(batch, distribution::ACTUAL_HARVEST_DATE)?),
        None => None,
    };

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let invalid = |reason: String| StoreError::InvalidRow {
            row: offset + row,
            reason,
        };

        let date = date_value(dates, row).ok_or_else(|| invalid("null date".into()))?;
        let species_name = string_value(species_col.as_ref(), row)
            .ok_or_else(|| invalid("null or non-string species".into()))?;
        let species = Species::resolve(&species_name).map_err(|e| invalid(e.to_string()))?;
        let fingerlings_count = count_value(counts_col.as_ref(), row).map_err(invalid)?;

        let location = Location {
            province: optional_string(provinces, row),
            city: optional_string(cities, row),
            barangay: optional_string(barangays, row),
        };

        let actual_harvest_weight_kg = weights
            .filter(|arr| !arr.is_null(row))
            .map(|arr| arr.value(row).max(0.0));
        let actual_harvest_date = harvest_dates.and_then(|arr| date_value(arr, row));

        records.push(DistributionRecord {
            date,
            species,
            fingerlings_count,
            location,
            actual_harvest_weight_kg,
            actual_harvest_date,
        });
    }
    Ok(records)
}

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, StoreError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| StoreError::Schema(format!("missing '{name}' column")))
}

fn date_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Date32Array, StoreError> {
    let col = required_column(batch, name)?;
    col.as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| type_mismatch(name, col))
}

fn type_mismatch(name: &str, col: &ArrayRef) -> StoreError {
    StoreError::Schema(format!("unexpected type for '{name}': {:?}", col.data_type()))
}

fn date_value(arr: &Date32Array, row: usize) -> Option<NaiveDate> {
    if arr.is_null(row) {
        return None;
    }
    arr.value_as_date(row)
}

/// Extract a string, handling both `Utf8` and `LargeUtf8`.
fn string_value(col: &dyn Array, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Some(arr.value(row).to_string())
    } else {
        col.as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|arr| arr.value(row).to_string())
    }
}

fn optional_string(col: Option<&ArrayRef>, row: usize) -> String {
    col.and_then(|c| string_value(c.as_ref(), row))
        .unwrap_or_default()
}

fn count_value(col: &dyn Array, row: usize) -> Result<u64, String> {
    if col.is_null(row) {
        return Err("null fingerlings_count".into());
    }
    if let Some(arr) = col.as_any().downcast_ref::<UInt64Array>() {
        return Ok(arr.value(row));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        let value = arr.value(row);
        return u64::try_from(value).map_err(|_| format!("negative fingerlings_count {value}"));
    }
    Err(format!(
        "unexpected type for 'fingerlings_count': {:?}",
        col.data_type()
    ))
}
