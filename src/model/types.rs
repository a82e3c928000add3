use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The measured quantity class requested per sample.
///
/// The wire name doubles as the attribute key in the sample envelope and as
/// the column label in the CSV export.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum EnergyType {
    /// Instantaneous power
    Power,
    /// Accumulated energy
    Energy,
    /// Electrical current
    Current,
}

impl EnergyType {
    pub const ALL: [EnergyType; 3] = [EnergyType::Power, EnergyType::Energy, EnergyType::Current];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyType::Power => "power",
            EnergyType::Energy => "energy",
            EnergyType::Current => "current",
        }
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnergyType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnergyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ConfigError::invalid(
                    "type",
                    format!("unknown energy type '{}', valid types are {}", s, join_names(&EnergyType::ALL)),
                )
            })
    }
}

/// Server-side time bucketing applied to samples.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AggregationLevel {
    /// Raw samples
    None,
    Minutes1,
    Minutes15,
    Hours1,
    Days1,
}

impl AggregationLevel {
    pub const ALL: [AggregationLevel; 5] = [
        AggregationLevel::None,
        AggregationLevel::Minutes1,
        AggregationLevel::Minutes15,
        AggregationLevel::Hours1,
        AggregationLevel::Days1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationLevel::None => "none",
            AggregationLevel::Minutes1 => "minutes_1",
            AggregationLevel::Minutes15 => "minutes_15",
            AggregationLevel::Hours1 => "hours_1",
            AggregationLevel::Days1 => "days_1",
        }
    }
}

impl fmt::Display for AggregationLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AggregationLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                ConfigError::invalid(
                    "aggr",
                    format!(
                        "unknown aggregation level '{}', valid levels are {}",
                        s,
                        join_names(&AggregationLevel::ALL)
                    ),
                )
            })
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExportFormat {
    /// Pivoted grid with a five-row sensor header
    Csv,
    /// Raw sample records as one JSON array
    Json,
}

impl ExportFormat {
    /// File extension, also the CLI spelling.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ConfigError::invalid(
                "format",
                format!("unknown format '{}', valid formats are csv, json", other),
            )),
        }
    }
}

fn join_names<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
