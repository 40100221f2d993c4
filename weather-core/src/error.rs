use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Every way a fetch or convert run can fail.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{input}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(
        "No Dark Sky API key configured.\n\
         Hint: export DARK_SKY_API_KEY or run `weather-history configure`."
    )]
    MissingCredential,

    #[error("Remote weather query failed for {target}: {reason}")]
    RemoteQuery { target: String, reason: String },

    #[error("Failed to access file '{}'", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input in {origin}: {reason}")]
    MalformedInput { origin: String, reason: String },
}

impl WeatherError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WeatherError::FileAccess { path: path.into(), source }
    }

    pub(crate) fn malformed(origin: impl Into<String>, reason: impl ToString) -> Self {
        WeatherError::MalformedInput { origin: origin.into(), reason: reason.to_string() }
    }

    pub(crate) fn remote(target: impl Into<String>, reason: impl ToString) -> Self {
        WeatherError::RemoteQuery { target: target.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
