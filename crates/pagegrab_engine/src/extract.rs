use std::sync::Arc;

use pagegrab_core::ExtractionContext;
use pagegrab_logging::grab_debug;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::decode::decode_body;
use crate::fetch::Fetcher;
use crate::{FailureKind, FetchError, FetchMetadata};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector `{selector}`: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|err| SelectorError {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// The heading and content selectors a page is walked with.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    heading: Selector,
    content: Selector,
}

impl SelectorSet {
    pub fn parse(heading: &str, content: &str) -> Result<Self, SelectorError> {
        Ok(Self {
            heading: parse_selector(heading)?,
            content: parse_selector(content)?,
        })
    }
}

pub trait Extractor: Send + Sync {
    /// Feed every selector match in `html` into `ctx`, in document order.
    fn extract_into(&self, html: &str, ctx: &mut ExtractionContext);
}

#[derive(Debug, Clone)]
pub struct SelectorExtractor {
    selectors: SelectorSet,
}

impl SelectorExtractor {
    pub fn new(selectors: SelectorSet) -> Self {
        Self { selectors }
    }
}

impl Extractor for SelectorExtractor {
    fn extract_into(&self, html: &str, ctx: &mut ExtractionContext) {
        let doc = Html::parse_document(html);
        for heading in doc.select(&self.selectors.heading) {
            ctx.on_heading(&element_text(heading));
        }
        for paragraph in doc.select(&self.selectors.content) {
            ctx.on_content(&element_text(paragraph));
        }
    }
}

/// Concatenated text of an element and all of its descendants.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Fetch, decode and extract one page into a worker's context.
#[derive(Clone)]
pub struct PageExtractor {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
}

impl PageExtractor {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn Extractor>) -> Self {
        Self { fetcher, extractor }
    }

    /// On error `ctx` is left empty; nothing from the failed page is kept.
    /// Parsing runs on the blocking pool so other workers keep fetching.
    pub async fn visit(
        &self,
        url: &str,
        ctx: &mut ExtractionContext,
    ) -> Result<FetchMetadata, FetchError> {
        ctx.reset();
        let output = self.fetcher.fetch(url).await?;
        let html = decode_body(&output.bytes, output.metadata.content_type.as_deref());

        let extractor = self.extractor.clone();
        let mut owned = std::mem::take(ctx);
        let filled = tokio::task::spawn_blocking(move || {
            extractor.extract_into(&html, &mut owned);
            owned
        })
        .await
        .map_err(|err| FetchError::new(FailureKind::Extract, err.to_string()))?;
        *ctx = filled;

        grab_debug!(
            "Extracted url={} headings={} paragraphs={} final_url={}",
            url,
            ctx.heading_matches(),
            ctx.content_matches(),
            output.metadata.final_url
        );
        Ok(output.metadata)
    }
}
