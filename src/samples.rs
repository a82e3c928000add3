//! Accumulation of sample pages into the reading table.
//!
//! Pages are folded in as they arrive. CSV exports pivot them into a
//! [`ReadingTable`]; JSON exports keep the raw records.

use crate::api::{SampleRecord, Sensor};
use crate::model::EnergyType;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Per-sensor values of one row, one entry per requested energy type.
pub type SensorReadings = HashMap<EnergyType, Option<f64>>;

/// One timestamp of the reading table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Epoch seconds
    pub timestamp: i64,
    pub date_time: DateTime<Utc>,
    pub readings: HashMap<String, SensorReadings>,
}

impl Row {
    /// Value of `sensor_id` for `energy_type`, `None` when nothing was reported.
    pub fn value(&self, sensor_id: &str, energy_type: EnergyType) -> Option<f64> {
        self.readings
            .get(sensor_id)
            .and_then(|readings| readings.get(&energy_type))
            .copied()
            .flatten()
    }
}

/// Rows in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingTable {
    rows: Vec<Row>,
}

impl ReadingTable {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Receives the records of each fetched page, in fetch order.
pub trait PageSink {
    fn add_page(&mut self, records: Vec<SampleRecord>);
}

/// Builds a [`ReadingTable`] with a stable column set.
///
/// Every row carries exactly the selected sensors, and each of them exactly
/// one entry per requested energy type.
pub struct ReadingTableBuilder {
    sensor_ids: Vec<String>,
    energy_types: Vec<EnergyType>,
    table: ReadingTable,
}

impl ReadingTableBuilder {
    pub fn new(sensors: &[Sensor], energy_types: &[EnergyType]) -> Self {
        Self {
            sensor_ids: sensors.iter().map(|sensor| sensor.id.clone()).collect(),
            energy_types: energy_types.to_vec(),
            table: ReadingTable::default(),
        }
    }

    fn empty_readings(&self) -> HashMap<String, SensorReadings> {
        self.sensor_ids
            .iter()
            .map(|id| {
                let readings = self.energy_types.iter().map(|t| (*t, None)).collect();
                (id.clone(), readings)
            })
            .collect()
    }

    fn add_record(&mut self, record: &SampleRecord) {
        let attributes = &record.attributes;
        let Some(date_time) = DateTime::from_timestamp(attributes.timestamp, 0) else {
            tracing::warn!(
                "Skipping record {} with out-of-range timestamp {}",
                record.id,
                attributes.timestamp
            );
            return;
        };
        let mut readings = self.empty_readings();

        for energy_type in &self.energy_types {
            for sample in attributes.values(*energy_type) {
                match readings.get_mut(&sample.sensor_id) {
                    Some(sensor_readings) => {
                        sensor_readings.insert(*energy_type, sample.value);
                    }
                    None => tracing::debug!(
                        "Dropping {} value of unselected sensor {}",
                        energy_type,
                        sample.sensor_id
                    ),
                }
            }
        }

        if let Some(previous) = self.table.rows.last() {
            if previous.timestamp > attributes.timestamp {
                tracing::warn!(
                    "Row {} arrived after {}, table is no longer chronological",
                    attributes.timestamp,
                    previous.timestamp
                );
            }
        }

        self.table.rows.push(Row {
            timestamp: attributes.timestamp,
            date_time,
            readings,
        });
    }

    pub fn finish(self) -> ReadingTable {
        self.table
    }
}

impl PageSink for ReadingTableBuilder {
    fn add_page(&mut self, records: Vec<SampleRecord>) {
        for record in &records {
            self.add_record(record);
        }
    }
}

/// Keeps the raw records for the JSON export.
#[derive(Debug, Default)]
pub struct RawSamples {
    records: Vec<SampleRecord>,
}

impl RawSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Vec<SampleRecord> {
        self.records
    }
}

impl PageSink for RawSamples {
    fn add_page(&mut self, records: Vec<SampleRecord>) {
        self.records.extend(records);
    }
}
