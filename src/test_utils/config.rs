//! Configuration builders for tests.

use crate::config::{ApiConfig, ExportRequest};
use crate::model::{AggregationLevel, EnergyType, ExportFormat};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use std::path::PathBuf;

/// Builder for creating test API configurations.
#[derive(Debug)]
pub struct TestApiConfigBuilder {
    url: String,
    token: String,
}

impl TestApiConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://test.local".to_string(),
            token: "test_token".to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn build(self) -> ApiConfig {
        ApiConfig {
            url: self.url,
            token: self.token,
        }
    }
}

/// Builder for export requests.
///
/// Defaults to one UTC day starting 2024-01-01, logger `L1`, power readings
/// at one-minute aggregation, CSV output into the current directory.
#[derive(Debug)]
pub struct TestExportRequestBuilder {
    logger_id: String,
    sensors: Vec<String>,
    energy_types: Vec<EnergyType>,
    aggregation: AggregationLevel,
    format: ExportFormat,
    from: DateTime<Tz>,
    to: DateTime<Tz>,
    output_dir: PathBuf,
}

impl TestExportRequestBuilder {
    pub fn new() -> Self {
        Self {
            logger_id: "L1".to_string(),
            sensors: Vec::new(),
            energy_types: vec![EnergyType::Power],
            aggregation: AggregationLevel::Minutes1,
            format: ExportFormat::Csv,
            from: Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            to: Tz::UTC.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_logger(mut self, logger_id: impl Into<String>) -> Self {
        self.logger_id = logger_id.into();
        self
    }

    pub fn with_sensors(mut self, sensors: &[&str]) -> Self {
        self.sensors = sensors.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_energy_types(mut self, energy_types: Vec<EnergyType>) -> Self {
        self.energy_types = energy_types;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationLevel) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the range; both ends are interpreted in UTC.
    pub fn with_range(mut self, from: DateTime<chrono::Utc>, to: DateTime<chrono::Utc>) -> Self {
        self.from = from.with_timezone(&Tz::UTC);
        self.to = to.with_timezone(&Tz::UTC);
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn build(self) -> ExportRequest {
        ExportRequest {
            logger_id: self.logger_id,
            sensors: self.sensors,
            energy_types: self.energy_types,
            aggregation: self.aggregation,
            format: self.format,
            from: self.from,
            to: self.to,
            output_dir: self.output_dir,
        }
    }
}
