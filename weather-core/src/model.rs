use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};

/// Format used for query instants, both as map keys and as the remote query parameter.
pub const INSTANT_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format of the local-time text stored in each reading.
pub const READING_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Representative coordinates of one postal code.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One calendar day at a fixed time-of-day; each instant is one remote query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryInstant(NaiveDateTime);

impl QueryInstant {
    pub fn new(day: NaiveDate, time: NaiveTime) -> Self {
        Self(day.and_time(time))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for QueryInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(INSTANT_FMT))
    }
}

impl Serialize for QueryInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    pub timestamp: String,
    pub temperature: f64,
}

/// A single CSV output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRecord {
    pub timestamp: String,
    pub temperature: f64,
}

impl From<&HourlyReading> for FlatRecord {
    fn from(reading: &HourlyReading) -> Self {
        Self { timestamp: reading.timestamp.clone(), temperature: reading.temperature }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_instant_formats_as_iso_utc() {
        let day = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let instant = QueryInstant::new(day, NaiveTime::MIN);

        assert_eq!(instant.to_string(), "2019-01-01T00:00:00Z");
        assert_eq!(serde_json::to_string(&instant).unwrap(), "\"2019-01-01T00:00:00Z\"");
    }

    #[test]
    fn flat_record_copies_reading_fields() {
        let reading = HourlyReading { timestamp: "2019-01-01 05:00:00".into(), temperature: 12.5 };
        let record = FlatRecord::from(&reading);

        assert_eq!(record.timestamp, reading.timestamp);
        assert_eq!(record.temperature, 12.5);
    }
}
