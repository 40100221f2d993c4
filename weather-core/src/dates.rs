//! Turning a start/end pair into the per-day query instants.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    error::{Result, WeatherError},
    model::{INSTANT_FMT, QueryInstant},
};

/// Parse a command-line date. Accepts `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`;
/// only the calendar day is kept.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, INSTANT_FMT).map(|dt| dt.date()))
        .map_err(|source| WeatherError::InvalidDate { input: input.to_string(), source })
}

/// One instant per calendar day from `start` through `end`, both inclusive.
pub fn expand_range(start: NaiveDate, end: NaiveDate, time: NaiveTime) -> Result<Vec<QueryInstant>> {
    let span = end.signed_duration_since(start).num_days();
    let span = u64::try_from(span).map_err(|_| WeatherError::InvalidRange { start, end })?;

    let instants = (0..=span)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|day| QueryInstant::new(day, time))
        .collect();

    Ok(instants)
}
