use clap::Parser;
use std::path::PathBuf;

/// Export energy-sensor readings of a data logger into a CSV or JSON file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// API access token.
    #[clap(long, env = "EB_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Id of the data logger.
    #[clap(long, env = "EB_LOGGER")]
    pub logger: Option<String>,

    /// Lower date (inclusive), e.g. `2024-1-31`. Defaults to the day before yesterday.
    #[clap(long)]
    pub from: Option<String>,

    /// Upper date (exclusive). Defaults to the day after `--from`.
    #[clap(long)]
    pub to: Option<String>,

    /// Timezone the dates are interpreted in, e.g. `Europe/Berlin`.
    #[clap(long, default_value = "UTC", env = "EB_TZ")]
    pub tz: String,

    /// Aggregation level: none, minutes_1, minutes_15, hours_1 or days_1.
    #[clap(long = "aggr", default_value = "minutes_1")]
    pub aggregation: String,

    /// Id of a sensor to export; repeat for several. All sensors when omitted.
    #[clap(long = "sensor")]
    pub sensors: Vec<String>,

    /// Energy type to export: power, energy or current; repeat or comma-separate for several.
    #[clap(long = "type", value_delimiter = ',', default_value = "power")]
    pub energy_types: Vec<String>,

    /// Output format: csv or json.
    #[clap(long, default_value = "csv")]
    pub format: String,

    /// Directory the export file is written to.
    #[clap(long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,
}
