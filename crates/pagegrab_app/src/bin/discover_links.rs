//! Builds `urls.json` from the links on a listing page.

use std::process::ExitCode;

use pagegrab_app::logging::{self, LogDestination};
use pagegrab_engine::{run_discovery_blocking, DiscoverySettings, FetchSettings};
use pagegrab_logging::{grab_error, grab_info};

fn main() -> ExitCode {
    logging::initialize(LogDestination::Terminal);

    let settings = DiscoverySettings::default();
    match run_discovery_blocking(&settings, FetchSettings::default()) {
        Ok(links) => {
            grab_info!(
                "JSON data saved to {} ({} links)",
                settings.output_file.display(),
                links.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            grab_error!("Discovery from {} failed: {}", settings.listing_url, err);
            ExitCode::FAILURE
        }
    }
}
