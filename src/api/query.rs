//! Request targets for the samples endpoint.
//!
//! The first page of every day is addressed by a freshly built query; every
//! following page by the cursor the API returned, which is used verbatim.

use crate::model::{AggregationLevel, EnergyType};
use chrono::{DateTime, TimeZone};
use url::form_urlencoded;

pub const SAMPLES_PATH: &str = "/v2/samples";

/// Filters of one samples request.
#[derive(Debug, Clone)]
pub struct SamplesQuery<'a> {
    pub logger_id: &'a str,
    /// Explicitly requested sensor ids; empty means all
    pub sensors: &'a [String],
    pub energy_types: &'a [EnergyType],
    pub aggregation: AggregationLevel,
}

impl SamplesQuery<'_> {
    /// Builds the path and query string for the `[start, end)` window.
    ///
    /// # Format
    /// ```text
    /// /v2/samples?aggregation_level=minutes_1&filter%5Bfrom%5D=1704067200&filter%5Bto%5D=1704153600
    ///     &filter%5Bdata_logger%5D=L1&fields%5Bsamples%5D=timestamp%2Cpower&filter%5Bsensor%5D=A%2CB
    /// ```
    pub fn path<Tz: TimeZone>(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
        let fields = std::iter::once("timestamp")
            .chain(self.energy_types.iter().map(EnergyType::as_str))
            .collect::<Vec<_>>()
            .join(",");

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("aggregation_level", self.aggregation.as_str())
            .append_pair("filter[from]", &start.timestamp().to_string())
            .append_pair("filter[to]", &end.timestamp().to_string())
            .append_pair("filter[data_logger]", self.logger_id)
            .append_pair("fields[samples]", &fields);

        if !self.sensors.is_empty() {
            serializer.append_pair("filter[sensor]", &self.sensors.join(","));
        }

        format!("{}?{}", SAMPLES_PATH, serializer.finish())
    }
}

/// Extracts `page[offset]` from a cursor, for progress logging only.
pub fn page_offset(cursor: &str) -> Option<String> {
    let (_, query) = cursor.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page[offset]")
        .map(|(_, value)| value.into_owned())
}
