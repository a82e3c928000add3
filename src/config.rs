use crate::cli::Args;
use crate::error::ConfigError;
use crate::model::{AggregationLevel, EnergyType, ExportFormat};
use crate::paginator::start_of_day;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde_derive::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

fn default_api_url() -> String {
    "https://api.internetofefficiency.com".to_string()
}

#[derive(Deserialize, Debug)]
struct ApiEnv {
    #[serde(default = "default_api_url")]
    api_url: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub url: String,
    pub token: String,
}

/// Combines the `EB_`-prefixed environment with the token from the command line.
pub(crate) fn load_api_config(token: Option<&str>) -> Result<ApiConfig, ConfigError> {
    let env = envy::prefixed("EB_")
        .from_env::<ApiEnv>()
        .map_err(ConfigError::env_parse)?;

    let token = token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ConfigError::missing("access token (--token or EB_ACCESS_TOKEN)"))?;

    Ok(ApiConfig {
        url: env.api_url,
        token: token.to_string(),
    })
}

/// Everything one run needs to know, fixed before the first request.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub logger_id: String,
    /// Explicitly requested sensor ids; empty means all sensors of the logger
    pub sensors: Vec<String>,
    pub energy_types: Vec<EnergyType>,
    pub aggregation: AggregationLevel,
    pub format: ExportFormat,
    pub from: DateTime<Tz>,
    pub to: DateTime<Tz>,
    pub output_dir: PathBuf,
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ConfigError::invalid(field, format!("'{}' is not a YYYY-M-D date: {}", value, e))
    })
}

fn day_start(field: &str, date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>, ConfigError> {
    start_of_day(&tz, date)
        .ok_or_else(|| ConfigError::invalid(field, format!("{} does not exist in {}", date, tz)))
}

fn dedup<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

impl ExportRequest {
    /// Validates the command line into a request.
    ///
    /// Without `--from` the range starts at midnight two days before `now`
    /// (in the requested timezone); without `--to` it spans one day.
    pub fn from_args(args: &Args, now: DateTime<Utc>) -> Result<Self, ConfigError> {
        let logger_id = args
            .logger
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigError::missing("data logger id (--logger)"))?
            .to_string();

        let tz: Tz = args
            .tz
            .parse()
            .map_err(|e| ConfigError::invalid("tz", format!("timezone could not be parsed: {}", e)))?;

        let aggregation = args.aggregation.parse::<AggregationLevel>()?;
        let format = args.format.parse::<ExportFormat>()?;

        let energy_types = args
            .energy_types
            .iter()
            .map(|t| t.trim().parse::<EnergyType>())
            .collect::<Result<Vec<_>, _>>()?;
        let energy_types = dedup(&energy_types);
        if energy_types.is_empty() {
            return Err(ConfigError::missing("energy type (--type)"));
        }

        let sensors: Vec<String> = args
            .sensors
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        let from_date = match &args.from {
            Some(value) => parse_date("from", value)?,
            None => now.with_timezone(&tz).date_naive() - Days::new(2),
        };
        let to_date = match &args.to {
            Some(value) => parse_date("to", value)?,
            None => from_date + Days::new(1),
        };
        let from = day_start("from", from_date, tz)?;
        let to = day_start("to", to_date, tz)?;
        if from >= to {
            return Err(ConfigError::invalid(
                "to",
                format!("{} is not after {}", to_date, from_date),
            ));
        }

        Ok(Self {
            logger_id,
            sensors: dedup(&sensors),
            energy_types,
            aggregation,
            format,
            from,
            to,
            output_dir: args.output_dir.clone(),
        })
    }
}
