//! Pagegrab engine: fetch, extract and persist a batch of pages with a fixed worker pool.
mod batch;
mod config;
mod decode;
mod discover;
mod events;
mod extract;
mod fetch;
mod persist;
mod pool;
mod queue;
mod seed;
mod types;

pub use batch::{build_pool, run_batch_blocking, BatchError};
pub use config::{
    ConfigError, FetchConfig, ScrapeConfig, DEFAULT_CONTENT_SELECTOR, DEFAULT_HEADING_SELECTOR,
    DEFAULT_OUTPUT_DIR, DEFAULT_URLS_FILE, DEFAULT_WORKERS,
};
pub use decode::decode_body;
pub use discover::{
    discover_links, extract_listing_links, run_discovery_blocking, DiscoveryError,
    DiscoverySettings,
};
pub use events::{EventSink, LogSink};
pub use extract::{Extractor, PageExtractor, SelectorError, SelectorExtractor, SelectorSet};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_output_dir, OutputWriter, PersistError};
pub use pool::WorkerPool;
pub use queue::WorkQueue;
pub use seed::{load_url_batch, save_url_batch, SeedError};
pub use types::{
    BatchEvent, BatchReport, FailureKind, FetchError, FetchMetadata, FetchOutput, SkippedUrl,
    WorkerId, WrittenPage,
};
