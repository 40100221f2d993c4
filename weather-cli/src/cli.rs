use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use weather_core::{
    Config, FetchJob,
    config::API_KEY_ENV,
    convert::run_convert,
    dates::parse_date,
    fetch::run_fetch,
    provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-history",
    version,
    about = "Fetch historical hourly weather per postal code and convert it to CSV"
)]
pub struct Cli {
    /// Suppress progress output and the completion notice.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Dump intermediate structures to the console.
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Config file to use instead of the platform default.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch hourly temperatures for every premises postal code and write them as JSON.
    Fetch {
        /// `;`-delimited table with Zip, Latitude and Longitude columns.
        geo_file: PathBuf,

        /// CSV with a "Postal Code" column listing the premises to look up.
        premises_file: PathBuf,

        /// First day to query, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ.
        #[arg(value_parser = parse_date_arg)]
        start: NaiveDate,

        /// Last day to query (inclusive), same format as start.
        #[arg(value_parser = parse_date_arg)]
        end: NaiveDate,

        /// Write temperature data to this JSON file.
        output: PathBuf,

        /// Additional postal code to query; may be repeated.
        #[arg(long = "zip", value_name = "CODE")]
        zips: Vec<String>,
    },

    /// Flatten a fetched JSON file into a time-sorted timestamp,temperature CSV.
    Convert {
        /// JSON input file with temperature data.
        input: PathBuf,

        /// Write temperature data to this CSV file.
        output: PathBuf,
    },

    /// Store the Dark Sky API key in the config file.
    Configure,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { quiet, config, command, .. } = self;

        match command {
            Command::Fetch { geo_file, premises_file, start, end, output, zips } => {
                let cfg = load_config(config.as_deref())?
                    .with_api_key_override(std::env::var(API_KEY_ENV).ok());
                let provider = provider_from_config(&cfg)?;

                let job = FetchJob {
                    geo_file,
                    premises_file,
                    extra_codes: zips,
                    start,
                    end,
                    query_time: cfg.query_time()?,
                    output,
                };

                let data = run_fetch(&job, provider.as_ref())
                    .await
                    .with_context(|| format!("Failed to fetch weather into {}", job.output.display()))?;
                info!(
                    "Stored {} readings for {} postal codes in {}",
                    data.reading_count(),
                    data.postal_codes().count(),
                    job.output.display()
                );
            }
            Command::Convert { input, output } => {
                let rows = run_convert(&input, &output).with_context(|| {
                    format!("Failed to convert {} into {}", input.display(), output.display())
                })?;
                info!("Wrote {} rows to {}", rows, output.display());
            }
            Command::Configure => {
                let mut cfg = load_config(config.as_deref())?;

                let api_key = inquire::Password::new("Dark Sky API key:")
                    .without_confirmation()
                    .with_display_mode(inquire::PasswordDisplayMode::Masked)
                    .prompt()
                    .context("Failed to read API key")?;
                cfg.set_api_key(api_key.trim().to_string());

                let path = match config {
                    Some(path) => {
                        cfg.save_to(&path)?;
                        path
                    }
                    None => cfg.save()?,
                };
                println!("Saved configuration to {}", path.display());
            }
        }

        if !quiet {
            println!("complete!");
        }

        Ok(())
    }
}
