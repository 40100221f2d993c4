//! The fetch path: premises → geo-points → per-day queries → aggregated JSON.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::{
    aggregate::AggregatedWeather,
    dates::expand_range,
    error::Result,
    geo::{load_geo_table, load_premises, lookup_geopoints},
    model::{GeoPoint, QueryInstant},
    provider::WeatherProvider,
    store::write_aggregated,
};

/// Everything one `fetch` run needs besides the provider.
#[derive(Debug, Clone)]
pub struct FetchJob {
    pub geo_file: PathBuf,
    pub premises_file: PathBuf,
    /// Postal codes requested in addition to those in the premises file.
    pub extra_codes: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub query_time: NaiveTime,
    pub output: PathBuf,
}

/// Query every (point, instant) pair in order and collect the results. Stops at the first failure.
pub async fn fetch_weather(
    provider: &dyn WeatherProvider,
    points: &BTreeMap<String, GeoPoint>,
    instants: &[QueryInstant],
) -> Result<AggregatedWeather> {
    let mut data = AggregatedWeather::new();

    for (postal_code, point) in points {
        info!("Fetching weather for {}", postal_code);
        data.ensure_point(postal_code);

        for instant in instants {
            info!("Fetching weather for {}", instant);
            let readings = provider.hourly_history(point, instant).await?;
            data.insert(postal_code, instant, readings);
        }
    }

    Ok(data)
}

/// Run a complete fetch and write the JSON artifact. Nothing is written if any step fails.
pub async fn run_fetch(job: &FetchJob, provider: &dyn WeatherProvider) -> Result<AggregatedWeather> {
    let instants = expand_range(job.start, job.end, job.query_time)?;

    let mut requested: BTreeSet<String> = load_premises(&job.premises_file)?.into_iter().collect();
    requested.extend(job.extra_codes.iter().cloned());
    debug!("requested postal codes: {:#?}", requested);

    let table = load_geo_table(&job.geo_file)?;
    let points = lookup_geopoints(&requested, &table);
    debug!("geo-points: {:#?}", points);

    let data = fetch_weather(provider, &points, &instants).await?;
    debug!("aggregated weather: {:#?}", data);

    write_aggregated(&job.output, &data)?;
    Ok(data)
}
