use crate::api::Sensor;
use crate::error::ExportError;
use crate::model::EnergyType;
use crate::samples::ReadingTable;
use std::io;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a present value with eight decimals, a missing one as an empty cell.
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:.8}", v)).unwrap_or_default()
}

/// The five header records, each `1 + sensors × energy types` cells wide.
///
/// Sensor metadata sits in the first column of the sensor's block, the
/// rest of the block is blank.
fn header_records(sensors: &[Sensor], energy_types: &[EnergyType]) -> Vec<Vec<String>> {
    let mut ids = vec!["id".to_string()];
    let mut descriptions = vec!["description".to_string()];
    let mut functional_areas = vec!["functional_area".to_string()];
    let mut rooms = vec!["room".to_string()];
    let mut types = vec!["timestamp".to_string()];

    for sensor in sensors {
        for (i, energy_type) in energy_types.iter().enumerate() {
            let first = i == 0;
            let cell = |value: &str| if first { value.to_string() } else { String::new() };
            ids.push(cell(&sensor.id));
            descriptions.push(cell(&sensor.description));
            functional_areas.push(cell(&sensor.functional_area));
            rooms.push(cell(&sensor.room));
            types.push(energy_type.to_string());
        }
    }

    vec![ids, descriptions, functional_areas, rooms, types]
}

/// Writes the pivoted table: one row per timestamp, one column per
/// (sensor, energy type) pair in header order.
pub fn write_csv<W: io::Write>(
    writer: W,
    table: &ReadingTable,
    sensors: &[Sensor],
    energy_types: &[EnergyType],
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in header_records(sensors, energy_types) {
        writer.write_record(&record)?;
    }

    for row in table.rows() {
        let mut record = Vec::with_capacity(1 + sensors.len() * energy_types.len());
        record.push(row.date_time.format(TIMESTAMP_FORMAT).to_string());
        for sensor in sensors {
            for energy_type in energy_types {
                record.push(format_value(row.value(&sensor.id, *energy_type)));
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
