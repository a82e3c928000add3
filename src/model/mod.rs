//! Domain vocabulary shared by the fetch, table and export stages.

pub mod types;

pub use types::{AggregationLevel, EnergyType, ExportFormat};
