/// The (title, content) pair produced from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: String,
    pub content: String,
}

/// Per-worker buffer that selector matches are fed into while a document is walked.
///
/// A worker owns exactly one context and calls [`ExtractionContext::reset`]
/// before every URL, so nothing carries over from the previous page.
#[derive(Debug, Default)]
pub struct ExtractionContext {
    result: ExtractionResult,
    heading_matches: usize,
    content_matches: usize,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.result.title.clear();
        self.result.content.clear();
        self.heading_matches = 0;
        self.content_matches = 0;
    }

    /// Heading match: overwrites the title, so the last match wins.
    pub fn on_heading(&mut self, text: &str) {
        self.result.title.clear();
        self.result.title.push_str(text.trim());
        self.heading_matches += 1;
    }

    /// Content match: appends the trimmed text plus a newline.
    pub fn on_content(&mut self, text: &str) {
        self.result.content.push_str(text.trim());
        self.result.content.push('\n');
        self.content_matches += 1;
    }

    pub fn title(&self) -> &str {
        &self.result.title
    }

    pub fn content(&self) -> &str {
        &self.result.content
    }

    pub fn heading_matches(&self) -> usize {
        self.heading_matches
    }

    pub fn content_matches(&self) -> usize {
        self.content_matches
    }

    /// Moves the current result out, leaving the context reset.
    pub fn take(&mut self) -> ExtractionResult {
        let result = std::mem::take(&mut self.result);
        self.reset();
        result
    }
}
