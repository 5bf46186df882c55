//! Seed-list discovery: pull one link per row out of a listing page.

use std::path::PathBuf;

use pagegrab_logging::{grab_debug, grab_info};
use scraper::Html;
use url::Url;

use crate::decode::decode_body;
use crate::extract::{parse_selector, SelectorError};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::seed::{save_url_batch, SeedError};
use crate::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("listing fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub listing_url: String,
    /// Matches one element per listed entry.
    pub row_selector: String,
    /// Searched inside each row; the first match's `href` is taken.
    pub link_selector: String,
    pub output_file: PathBuf,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            listing_url: "https://news.ycombinator.com/".to_string(),
            row_selector: "td:nth-child(3) > span".to_string(),
            link_selector: "a".to_string(),
            output_file: PathBuf::from("urls.json"),
        }
    }
}

/// Links in document order. Rows without a usable `href` are skipped and
/// relative links are resolved against `base_url` when it parses.
pub fn extract_listing_links(
    html: &str,
    base_url: &str,
    settings: &DiscoverySettings,
) -> Result<Vec<String>, SelectorError> {
    let rows = parse_selector(&settings.row_selector)?;
    let link = parse_selector(&settings.link_selector)?;
    let base = Url::parse(base_url).ok();
    let doc = Html::parse_document(html);

    let links = doc
        .select(&rows)
        .filter_map(|row| row.select(&link).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| match base.as_ref().and_then(|b| b.join(href).ok()) {
            Some(resolved) => resolved.to_string(),
            None => href.to_string(),
        })
        .collect();
    Ok(links)
}

/// Fetch the listing page and return its links.
pub async fn discover_links(
    fetcher: &dyn Fetcher,
    settings: &DiscoverySettings,
) -> Result<Vec<String>, DiscoveryError> {
    let output = fetcher.fetch(&settings.listing_url).await?;
    let html = decode_body(&output.bytes, output.metadata.content_type.as_deref());
    let links = extract_listing_links(&html, &output.metadata.final_url, settings)?;
    for link in &links {
        grab_debug!("Link: {}", link);
    }
    grab_info!("Discovered {} links on {}", links.len(), settings.listing_url);
    Ok(links)
}

/// Discover links with a [`ReqwestFetcher`] and write them to `settings.output_file`.
pub fn run_discovery_blocking(
    settings: &DiscoverySettings,
    fetch: FetchSettings,
) -> Result<Vec<String>, DiscoveryError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DiscoveryError::Runtime)?;
    let fetcher = ReqwestFetcher::new(fetch);
    let links = runtime.block_on(discover_links(&fetcher, settings))?;
    save_url_batch(&settings.output_file, &links)?;
    grab_info!("Saved {} links to {}", links.len(), settings.output_file.display());
    Ok(links)
}
