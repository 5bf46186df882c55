use std::io;
use std::sync::Arc;

use pagegrab_logging::grab_info;
use thiserror::Error;

use crate::config::{ConfigError, ScrapeConfig};
use crate::extract::{PageExtractor, SelectorExtractor};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::persist::OutputWriter;
use crate::pool::WorkerPool;
use crate::seed::{load_url_batch, SeedError};
use crate::BatchReport;

/// Anything that stops a batch before its first URL is fetched.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Assemble the pool described by `config` around `fetcher`.
pub fn build_pool(config: &ScrapeConfig, fetcher: Arc<dyn Fetcher>) -> Result<WorkerPool, ConfigError> {
    config.validate()?;
    let extractor = SelectorExtractor::new(config.selectors()?);
    let pages = PageExtractor::new(fetcher, Arc::new(extractor));
    Ok(WorkerPool::new(
        config.workers,
        pages,
        OutputWriter::new(config.output_dir.clone()),
    ))
}

/// Load the URL batch named by `config`, run it to completion on a fresh
/// multi-threaded runtime, and return the report.
pub fn run_batch_blocking(config: &ScrapeConfig) -> Result<BatchReport, BatchError> {
    let urls = load_url_batch(&config.urls_file)?;
    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.settings()));
    let pool = build_pool(config, fetcher)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(BatchError::Runtime)?;
    let report = runtime.block_on(pool.run(urls));

    grab_info!(
        "All pages have been processed: {} written, {} skipped",
        report.written.len(),
        report.skipped.len()
    );
    Ok(report)
}
