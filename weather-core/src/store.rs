//! Reading and writing the JSON artifact and the CSV export.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    aggregate::AggregatedWeather,
    error::{Result, WeatherError},
    model::FlatRecord,
};

pub fn parse_aggregated(bytes: &[u8], origin: &str) -> Result<AggregatedWeather> {
    serde_json::from_slice(bytes).map_err(|e| WeatherError::malformed(origin, e))
}

pub fn read_aggregated(path: &Path) -> Result<AggregatedWeather> {
    let bytes = fs::read(path).map_err(|e| WeatherError::file_access(path, e))?;
    parse_aggregated(&bytes, &path.display().to_string())
}

pub fn write_aggregated(path: &Path, data: &AggregatedWeather) -> Result<()> {
    let file = File::create(path).map_err(|e| WeatherError::file_access(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, data)
        .map_err(io::Error::from)
        .and_then(|_| writer.flush())
        .map_err(|e| WeatherError::file_access(path, e))?;

    debug!("wrote {} readings to {}", data.reading_count(), path.display());
    Ok(())
}

/// Write `timestamp,temperature` rows, header first.
pub fn write_records<W: Write>(writer: W, records: &[FlatRecord]) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if records.is_empty() {
        // serialize() only emits the header alongside the first row
        wtr.write_record(["timestamp", "temperature"])?;
    }
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()
}

pub fn write_csv(path: &Path, records: &[FlatRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| WeatherError::file_access(path, e))?;

    write_records(BufWriter::new(file), records)
        .map_err(|e| WeatherError::file_access(path, e))?;

    debug!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::model::{HourlyReading, QueryInstant};

    fn record(ts: &str, t: f64) -> FlatRecord {
        FlatRecord { timestamp: ts.into(), temperature: t }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let mut out = Vec::new();
        write_records(&mut out, &[record("2019-01-01 00:00:00", 20.5), record("2019-01-01 01:00:00", -3.25)])
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "timestamp,temperature\n2019-01-01 00:00:00,20.5\n2019-01-01 01:00:00,-3.25\n"
        );
    }

    #[test]
    fn empty_csv_still_has_header() {
        let mut out = Vec::new();
        write_records(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "timestamp,temperature\n");
    }

    #[test]
    fn json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.json");

        let mut data = AggregatedWeather::new();
        let instant = QueryInstant::new(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), NaiveTime::MIN);
        data.insert(
            "80202",
            &instant,
            vec![HourlyReading { timestamp: "2019-01-01 00:00:00".into(), temperature: 1.5 }],
        );

        write_aggregated(&path, &data).unwrap();
        assert_eq!(read_aggregated(&path).unwrap(), data);
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let inputs: [&[u8]; 4] = [
            b"[]",
            br#"{"80202": []}"#,
            br#"{"80202": {"2019-01-01T00:00:00Z": [{"time": 1546300800}]}}"#,
            b"not json",
        ];

        for input in inputs {
            let err = parse_aggregated(input, "test").unwrap_err();
            assert!(matches!(err, WeatherError::MalformedInput { .. }), "{err}");
        }
    }

    #[test]
    fn missing_input_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_aggregated(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, WeatherError::FileAccess { .. }));
    }

    #[test]
    fn unwritable_output_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");

        let err = write_csv(&path, &[]).unwrap_err();
        assert!(matches!(err, WeatherError::FileAccess { .. }));
    }
}
