use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{HourlyReading, QueryInstant};

/// Hourly series keyed by postal code, then by ISO query instant.
///
/// Serializes as a plain nested JSON object:
/// `{ "80202": { "2019-01-01T00:00:00Z": [ { "timestamp": ..., "temperature": ... } ] } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedWeather {
    points: BTreeMap<String, BTreeMap<String, Vec<HourlyReading>>>,
}

impl AggregatedWeather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the series for a postal code and instant, returning whatever was stored there before.
    pub fn insert(
        &mut self,
        postal_code: &str,
        instant: &QueryInstant,
        readings: Vec<HourlyReading>,
    ) -> Option<Vec<HourlyReading>> {
        self.points
            .entry(postal_code.to_string())
            .or_default()
            .insert(instant.to_string(), readings)
    }

    /// Make sure a postal code is present even if none of its queries produced readings.
    pub fn ensure_point(&mut self, postal_code: &str) {
        self.points.entry(postal_code.to_string()).or_default();
    }

    pub fn get(&self, postal_code: &str, instant: &str) -> Option<&[HourlyReading]> {
        self.points.get(postal_code)?.get(instant).map(Vec::as_slice)
    }

    pub fn instants(&self, postal_code: &str) -> impl Iterator<Item = &str> {
        self.points.get(postal_code).into_iter().flat_map(|days| days.keys().map(String::as_str))
    }

    pub fn postal_codes(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every reading across all postal codes and instants.
    pub fn readings(&self) -> impl Iterator<Item = &HourlyReading> {
        self.points.values().flat_map(|days| days.values()).flatten()
    }

    pub fn reading_count(&self) -> usize {
        self.points.values().flat_map(|days| days.values()).map(Vec::len).sum()
    }
}
