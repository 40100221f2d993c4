use crate::{
    Config, GeoPoint, HourlyReading, QueryInstant, error::Result,
    provider::darksky::DarkSkyProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod darksky;

/// Source of historical hourly observations.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Query the hourly series for one point on the day of `instant`. Exactly one remote call.
    async fn hourly_history(
        &self,
        point: &GeoPoint,
        instant: &QueryInstant,
    ) -> Result<Vec<HourlyReading>>;
}

/// Construct the Dark Sky provider from config. Fails if no API key is configured.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Box::new(DarkSkyProvider::new(api_key.to_owned(), config.base_url().to_owned())))
}
