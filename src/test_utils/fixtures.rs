//! Test fixtures for the metering API.
//!
//! Records and pages are built as typed values; the `*_json` variants render
//! the wire form served by mock HTTP servers.

use crate::api::models::{Links, SampleAttributes, SensorValue};
use crate::api::{SampleRecord, SamplesPage, Sensor};
use crate::model::EnergyType;
use serde_json::{json, Map};

/// A `/v2/data_loggers/{id}` body with two sensors, `A` and `B`.
pub fn logger_json(id: &str) -> String {
    json!({
        "data": {
            "type": "data_loggers",
            "id": id,
            "attributes": {
                "description": "Main distribution board",
                "building": "HQ",
                "mac_address": "00:11:22:33:44:55",
                "sample_frequency": 60,
                "num_phases": 3,
                "mdp": false,
                "created_at": 1600000000,
                "sensors": [
                    {
                        "sensor_id": "A",
                        "type": "current",
                        "phase": 1,
                        "description": "Oven",
                        "building_floor": "1",
                        "functional_area": "Kitchen",
                        "room": "R1",
                        "equipment_group": "Cooking",
                        "equipment_type": "Oven"
                    },
                    {
                        "sensor_id": "B",
                        "type": "current",
                        "phase": 2,
                        "description": "Lights",
                        "building_floor": null,
                        "functional_area": "Office",
                        "room": "R2",
                        "equipment_group": null,
                        "equipment_type": null
                    }
                ]
            }
        }
    })
    .to_string()
}

/// Sensors with predictable metadata: `Sensor X`, `Area X`, `Room X`.
pub fn sensors(ids: &[&str]) -> Vec<Sensor> {
    ids.iter()
        .map(|id| Sensor {
            id: id.to_string(),
            kind: "current".to_string(),
            phase: 1,
            description: format!("Sensor {}", id),
            building_floor: String::new(),
            functional_area: format!("Area {}", id),
            room: format!("Room {}", id),
            equipment_group: String::new(),
            equipment_type: String::new(),
        })
        .collect()
}

fn values(values: &[(&str, f64)]) -> Option<Vec<SensorValue>> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(|(sensor_id, value)| SensorValue {
                sensor_id: sensor_id.to_string(),
                value: Some(*value),
            })
            .collect(),
    )
}

/// A sample record with power and energy lists; an empty slice omits the list.
pub fn record(timestamp: i64, power: &[(&str, f64)], energy: &[(&str, f64)]) -> SampleRecord {
    SampleRecord {
        kind: "samples".to_string(),
        id: format!("sample-{}", timestamp),
        attributes: SampleAttributes {
            timestamp,
            power: values(power),
            energy: values(energy),
            current: None,
            extra: Map::new(),
        },
        extra: Map::new(),
    }
}

/// A sample record carrying only the list of `energy_type`.
pub fn record_with(timestamp: i64, energy_type: EnergyType, readings: &[(&str, f64)]) -> SampleRecord {
    let mut record = record(timestamp, &[], &[]);
    let list = values(readings);
    match energy_type {
        EnergyType::Power => record.attributes.power = list,
        EnergyType::Energy => record.attributes.energy = list,
        EnergyType::Current => record.attributes.current = list,
    }
    record
}

pub fn page(records: &[SampleRecord], next: &str) -> SamplesPage {
    SamplesPage {
        data: records.to_vec(),
        links: Links {
            next: next.to_string(),
        },
    }
}

/// Wire form of a samples page.
pub fn page_json(records: &[SampleRecord], next: &str) -> String {
    json!({
        "data": records,
        "links": { "next": next }
    })
    .to_string()
}
