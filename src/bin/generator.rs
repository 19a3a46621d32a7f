use std::process::ExitCode;
use std::time::Instant;

use envconfig::Envconfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use iobound::config::Config;
use iobound::testdata::create_test_data;

/// Regenerate the text, json and bincode data files, whether present or not
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();

    let config = match Config::init_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration from env: {e}");
            return ExitCode::FAILURE;
        }
    };

    let path = config.data_file();
    let rows = config.rows();
    info!(path = %path.display(), rows, "start generate data");

    if let Err(e) = create_test_data(&path, rows) {
        error!("failed to write test data: {e}");
        return ExitCode::FAILURE;
    }

    info!(elapsed = ?start.elapsed(), "end generate data");
    ExitCode::SUCCESS
}
