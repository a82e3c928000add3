mod client;
pub mod models;
pub mod query;

use crate::error::ApiError;
use async_trait::async_trait;

pub use client::Client;
pub use models::{select_sensors, Logger, SampleRecord, SamplesPage, Sensor};
pub use query::SamplesQuery;

/// Anything that can serve pages of the samples endpoint.
///
/// `target` is either a freshly built query path or the cursor returned by
/// the previous page; implementors must request it as given.
#[async_trait]
pub trait SampleSource: Send + Sync {
    async fn fetch_page(&self, target: &str) -> Result<SamplesPage, ApiError>;
}
