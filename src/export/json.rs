use crate::api::SampleRecord;
use crate::error::ExportError;
use std::io;

/// Writes the raw sample records as a single JSON array.
pub fn write_json<W: io::Write>(mut writer: W, records: &[SampleRecord]) -> Result<(), ExportError> {
    serde_json::to_writer(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
