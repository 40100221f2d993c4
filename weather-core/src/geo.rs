//! Postal-code tables: the premises list and the postal-code-to-coordinate lookup.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::{
    error::{Result, WeatherError},
    model::GeoPoint,
};

/// One row of the geo-reference table. Columns other than these are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoRow {
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct PremisesRow {
    #[serde(rename = "Postal Code")]
    postal_code: String,
}

/// Parse the `;`-delimited geo-reference table.
pub fn parse_geo_table(bytes: &[u8]) -> Result<Vec<GeoRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(bytes);

    reader
        .deserialize::<GeoRow>()
        .map(|res| res.map_err(|e| WeatherError::malformed("geo-reference table", e)))
        .collect()
}

/// Parse the `,`-delimited premises table into its unique postal codes, in first-seen order.
pub fn parse_premises(bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let mut seen = BTreeSet::new();
    let mut codes = Vec::new();

    for res in reader.deserialize::<PremisesRow>() {
        let row = res.map_err(|e| WeatherError::malformed("premises table", e))?;
        if row.postal_code.is_empty() {
            continue;
        }
        if seen.insert(row.postal_code.clone()) {
            codes.push(row.postal_code);
        }
    }

    Ok(codes)
}

/// Restrict the table to the requested codes. Requested codes missing from the table are dropped.
pub fn lookup_geopoints(requested: &BTreeSet<String>, table: &[GeoRow]) -> BTreeMap<String, GeoPoint> {
    table
        .iter()
        .filter(|row| requested.contains(&row.zip))
        .map(|row| {
            let point = GeoPoint {
                postal_code: row.zip.clone(),
                latitude: row.latitude,
                longitude: row.longitude,
            };
            (row.zip.clone(), point)
        })
        .collect()
}

pub fn load_geo_table(path: &Path) -> Result<Vec<GeoRow>> {
    let bytes = fs::read(path).map_err(|e| WeatherError::file_access(path, e))?;
    parse_geo_table(&bytes)
}

pub fn load_premises(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| WeatherError::file_access(path, e))?;
    parse_premises(&bytes)
}
