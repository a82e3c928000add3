//! Energy-sensor readings exporter.
//!
//! Fetches the readings of one data logger from the metering API, day by
//! day and page by page, and writes them into a single CSV or JSON file.
//!
//! # Exit codes
//!
//! - `0` the file was written
//! - `2` invalid configuration or arguments
//! - `3` the API rejected the access token
//! - `1` any other failure; no file is written

mod api;
mod cli;
mod config;
mod error;
mod export;
mod model;
mod paginator;
mod runner;
mod samples;

#[cfg(test)]
mod test_utils;

use crate::cli::Args;
use crate::config::ExportRequest;
use crate::error::Error;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let log_level = config::load_app_config()
        .map(|app_config| app_config.log_level())
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let args = Args::parse();
    match export(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            tracing::error!("{:#}", anyhow::Error::from(err));
            ExitCode::from(code)
        }
    }
}

async fn export(args: &Args) -> Result<PathBuf, Error> {
    let api_config = config::load_api_config(args.token.as_deref())?;
    let request = ExportRequest::from_args(args, Utc::now())?;
    let client = api::Client::new(api_config);
    runner::run(&client, &request).await
}
