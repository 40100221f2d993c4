use std::fmt::Display;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Result, WeatherError},
    model::{GeoPoint, HourlyReading, QueryInstant, READING_FMT},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net/forecast";

/// Only the hourly block is wanted.
const EXCLUDE: &str = "currently,daily,flags";

#[derive(Clone)]
pub struct DarkSkyProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// the key stays out of debug dumps
impl std::fmt::Debug for DarkSkyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DarkSkyProvider").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl DarkSkyProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    /// `{base}/{key}/{lat},{long},{instant}`, without the query string.
    fn request_url(&self, point: &GeoPoint, instant: &QueryInstant) -> String {
        format!(
            "{}/{}/{},{},{}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            point.latitude,
            point.longitude,
            instant
        )
    }
}

#[derive(Debug, Deserialize)]
struct DsHourlyEntry {
    time: i64,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct DsHourly {
    data: Vec<DsHourlyEntry>,
}

#[derive(Debug, Deserialize)]
struct DsTimeMachineResponse {
    hourly: DsHourly,
}

#[async_trait]
impl WeatherProvider for DarkSkyProvider {
    async fn hourly_history(
        &self,
        point: &GeoPoint,
        instant: &QueryInstant,
    ) -> Result<Vec<HourlyReading>> {
        let target = format!("{} at {}", point.postal_code, instant);

        let res = self
            .http
            .get(self.request_url(point, instant))
            .query(&[("exclude", EXCLUDE)])
            .send()
            .await
            .map_err(|e| WeatherError::remote(&target, e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::remote(&target, e.without_url()))?;

        if !status.is_success() {
            return Err(WeatherError::remote(
                &target,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        readings_from_body(&body, &Local).map_err(|reason| WeatherError::remote(&target, reason))
    }
}

/// Extract the hourly series from a time-machine response body, rendering each epoch in `tz`.
pub fn readings_from_body<Tz>(body: &str, tz: &Tz) -> std::result::Result<Vec<HourlyReading>, String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let parsed: DsTimeMachineResponse = serde_json::from_str(body)
        .map_err(|e| format!("unexpected response schema: {e}"))?;

    parsed
        .hourly
        .data
        .into_iter()
        .map(|entry| {
            let timestamp = format_epoch(entry.time, tz)
                .ok_or_else(|| format!("epoch {} out of range", entry.time))?;
            Ok(HourlyReading { timestamp, temperature: entry.temperature })
        })
        .collect()
}

pub fn format_epoch<Tz>(secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp(secs, 0).map(|dt| dt.with_timezone(tz).format(READING_FMT).to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
