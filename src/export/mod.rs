//! Serialization of a finished run into the output file.

mod csv;
mod json;

use crate::api::{SampleRecord, Sensor};
use crate::config::ExportRequest;
use crate::error::ExportError;
use crate::samples::ReadingTable;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use self::csv::write_csv;
use self::json::write_json;

/// What a run hands to the exporter, depending on the output format.
#[derive(Debug)]
pub enum ExportData {
    Table(ReadingTable),
    Raw(Vec<SampleRecord>),
}

/// Deterministic file name for a request.
///
/// `{fromEpoch}_{toEpoch}_{loggerId}_{energyTypes}_{aggregationLevel}.{ext}`,
/// so identical requests overwrite the same file.
pub fn file_name(request: &ExportRequest) -> String {
    let energy_types = request
        .energy_types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join("-");

    format!(
        "{}_{}_{}_{}_{}.{}",
        request.from.timestamp(),
        request.to.timestamp(),
        request.logger_id,
        energy_types,
        request.aggregation,
        request.format.extension()
    )
}

/// Writes `data` to `<output_dir>/<file_name>` and returns the path.
///
/// An existing file with the same name is truncated.
pub fn write(
    request: &ExportRequest,
    sensors: &[Sensor],
    data: &ExportData,
) -> Result<PathBuf, ExportError> {
    let path = request.output_dir.join(file_name(request));
    let file = File::create(&path)?;

    match data {
        ExportData::Table(table) => write_csv(file, table, sensors, &request.energy_types)?,
        ExportData::Raw(records) => write_json(BufWriter::new(file), records)?,
    }

    tracing::info!("Created file: {}", path.display());
    Ok(path)
}
