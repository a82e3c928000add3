//! Wire envelopes of the metering API and the descriptors built from them.

use crate::model::EnergyType;
use serde::de::Deserializer;
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(<Option<T> as serde::Deserialize>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single measurement channel on a logger.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sensor {
    #[serde(rename = "sensor_id")]
    pub id: String,
    /// Physical type of the channel as reported upstream
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phase: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub building_floor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub functional_area: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipment_group: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipment_type: String,
}

/// The metering device hosting the sensors.
#[derive(Debug, Clone, PartialEq)]
pub struct Logger {
    pub id: String,
    pub description: String,
    pub building: String,
    pub mac_address: String,
    pub sample_frequency: i64,
    pub num_phases: i64,
    pub mdp: bool,
    pub created_at: i64,
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoggerEnvelope {
    data: LoggerData,
}

#[derive(Debug, Deserialize)]
struct LoggerData {
    id: String,
    attributes: LoggerAttributes,
}

#[derive(Debug, Deserialize)]
struct LoggerAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    building: String,
    #[serde(default, deserialize_with = "null_as_default")]
    mac_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    sample_frequency: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    num_phases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    mdp: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    created_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    sensors: Vec<Sensor>,
}

impl From<LoggerEnvelope> for Logger {
    fn from(envelope: LoggerEnvelope) -> Self {
        let LoggerData { id, attributes } = envelope.data;
        Logger {
            id,
            description: attributes.description,
            building: attributes.building,
            mac_address: attributes.mac_address,
            sample_frequency: attributes.sample_frequency,
            num_phases: attributes.num_phases,
            mdp: attributes.mdp,
            created_at: attributes.created_at,
            sensors: attributes.sensors,
        }
    }
}

/// One page of the `/v2/samples` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SamplesPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<SampleRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Links,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default, deserialize_with = "null_as_default")]
    pub next: String,
}

impl SamplesPage {
    /// Cursor of the following page, `None` on the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        let next = self.links.next.trim();
        (!next.is_empty()).then_some(next)
    }
}

/// A raw sample record, kept as received for the JSON export.
///
/// Fields without a typed counterpart are carried in `extra` so that
/// re-encoding reproduces them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SampleRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    pub attributes: SampleAttributes,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SampleAttributes {
    /// Epoch seconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Vec<SensorValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Vec<SensorValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Vec<SensorValue>>,
    /// Attributes such as `system_temperature` that are exported untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SampleAttributes {
    /// Values reported for `energy_type`; empty when the list is absent.
    pub fn values(&self, energy_type: EnergyType) -> &[SensorValue] {
        let values = match energy_type {
            EnergyType::Power => &self.power,
            EnergyType::Energy => &self.energy,
            EnergyType::Current => &self.current,
        };
        values.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SensorValue {
    pub sensor_id: String,
    pub value: Option<f64>,
}

/// Picks the sensors to export, in the logger's order.
///
/// An empty `requested` list selects every sensor. Requested ids the logger
/// does not know are skipped with a warning.
pub fn select_sensors(sensors: &[Sensor], requested: &[String]) -> Vec<Sensor> {
    if requested.is_empty() {
        return sensors.to_vec();
    }

    for id in requested {
        if !sensors.iter().any(|sensor| &sensor.id == id) {
            tracing::warn!("Sensor {} is not attached to this logger, skipping", id);
        }
    }

    sensors
        .iter()
        .filter(|sensor| requested.contains(&sensor.id))
        .cloned()
        .collect()
}
