//! The convert path: aggregated JSON → flat, time-ordered CSV.

use std::path::Path;

use tracing::debug;

use crate::{
    aggregate::AggregatedWeather,
    error::Result,
    model::FlatRecord,
    store::{read_aggregated, write_csv},
};

/// Every reading as a flat record, ordered by `timestamp`. Equal timestamps keep their relative order.
pub fn flatten(data: &AggregatedWeather) -> Vec<FlatRecord> {
    let mut records: Vec<FlatRecord> = data.readings().map(FlatRecord::from).collect();
    sort_records(&mut records);
    records
}

pub fn sort_records(records: &mut [FlatRecord]) {
    // stable
    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}

/// Flatten a stored JSON artifact into a CSV file, returning the number of rows written.
pub fn run_convert(input: &Path, output: &Path) -> Result<usize> {
    let data = read_aggregated(input)?;
    let records = flatten(&data);
    debug!("flattened rows: {:#?}", records);

    write_csv(output, &records)?;
    Ok(records.len())
}
