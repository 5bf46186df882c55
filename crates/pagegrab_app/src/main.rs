use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use pagegrab_app::logging::{self, LogDestination};
use pagegrab_engine::{run_batch_blocking, ScrapeConfig};
use pagegrab_logging::{grab_error, grab_info};

const CONFIG_FILE: &str = "pagegrab.json";

fn main() -> ExitCode {
    let config = match ScrapeConfig::load_or_default(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(err) => {
            logging::initialize(LogDestination::Terminal);
            grab_error!("{:#}", anyhow::Error::new(err).context("loading configuration"));
            return ExitCode::FAILURE;
        }
    };
    logging::initialize(LogDestination::from_log_file(config.log_file.as_deref()));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            grab_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ScrapeConfig) -> anyhow::Result<()> {
    let report = run_batch_blocking(config)
        .with_context(|| format!("batch from {} aborted", config.urls_file.display()))?;
    if !report.skipped.is_empty() {
        grab_info!("{} of {} urls were skipped", report.skipped.len(), report.processed());
    }
    grab_info!("All data has been processed.");
    Ok(())
}
