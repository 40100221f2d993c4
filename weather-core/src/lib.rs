//! Core library for the `weather-history` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Postal-code and geo-reference table loading
//! - Date range expansion into per-day query instants
//! - Abstraction over the historical weather provider (Dark Sky time machine)
//! - The fetch pipeline that aggregates hourly series per postal code and day
//! - The convert pipeline that flattens stored results into a sorted CSV
//!
//! It is used by `weather-history-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod convert;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod geo;
pub mod model;
pub mod provider;
pub mod store;

pub use aggregate::AggregatedWeather;
pub use config::Config;
pub use error::WeatherError;
pub use fetch::FetchJob;
pub use model::{FlatRecord, GeoPoint, HourlyReading, QueryInstant};
pub use provider::{WeatherProvider, provider_from_config};
