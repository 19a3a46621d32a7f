use std::process::ExitCode;
use std::time::Instant;

use envconfig::Envconfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use iobound::bench::run;
use iobound::config::Config;

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

    match run(&config) {
        Ok(reports) => {
            for report in &reports {
                println!("{report}");
            }
            info!(elapsed = ?start.elapsed(), "finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("benchmark failed: {e}");
            ExitCode::FAILURE
        }
    }
}
