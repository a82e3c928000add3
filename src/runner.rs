//! One export run, from logger metadata to the written file.

use crate::api::{select_sensors, Client, SamplesQuery};
use crate::config::ExportRequest;
use crate::error::Result;
use crate::export::{self, ExportData};
use crate::model::ExportFormat;
use crate::paginator::Paginator;
use crate::samples::{RawSamples, ReadingTableBuilder};
use std::path::PathBuf;

/// Runs `request` against the API and returns the path of the export file.
///
/// Nothing is written unless every page was fetched.
pub async fn run(client: &Client, request: &ExportRequest) -> Result<PathBuf> {
    let logger = client.fetch_logger(&request.logger_id).await?;
    let sensors = select_sensors(&logger.sensors, &request.sensors);

    tracing::debug!(
        "Logger {}: building '{}', mac {}, {} phases, sampled every {}s, mdp {}, created at {}",
        logger.id,
        logger.building,
        logger.mac_address,
        logger.num_phases,
        logger.sample_frequency,
        logger.mdp,
        logger.created_at
    );

    tracing::info!(
        "Exporting {} of {} sensors of logger {} ({}) from {} to {}",
        sensors.len(),
        logger.sensors.len(),
        logger.id,
        logger.description,
        request.from,
        request.to
    );

    let query = SamplesQuery {
        logger_id: &request.logger_id,
        sensors: &request.sensors,
        energy_types: &request.energy_types,
        aggregation: request.aggregation,
    };
    let paginator = Paginator::new(client, query);

    let (data, stats) = match request.format {
        ExportFormat::Csv => {
            let mut builder = ReadingTableBuilder::new(&sensors, &request.energy_types);
            let stats = paginator.run(&request.from, &request.to, &mut builder).await?;
            let table = builder.finish();
            if table.is_empty() {
                tracing::warn!("No readings in the requested range");
            } else {
                tracing::debug!("Reading table has {} rows", table.len());
            }
            (ExportData::Table(table), stats)
        }
        ExportFormat::Json => {
            let mut raw = RawSamples::new();
            let stats = paginator.run(&request.from, &request.to, &mut raw).await?;
            (ExportData::Raw(raw.finish()), stats)
        }
    };

    tracing::info!(
        "Fetched {} records in {} pages over {} days",
        stats.records,
        stats.pages,
        stats.days
    );

    Ok(export::write(request, &sensors, &data)?)
}
