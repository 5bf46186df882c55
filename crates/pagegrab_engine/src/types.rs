use std::fmt;
use std::path::PathBuf;

use pagegrab_core::WorkerState;

pub type WorkerId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Why a single URL was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    Extract,
    Write,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Extract => write!(f, "extraction failed"),
            FailureKind::Write => write!(f, "write failed"),
        }
    }
}

/// Emitted by workers while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    StageChanged {
        worker: WorkerId,
        url: Option<String>,
        stage: WorkerState,
    },
    UrlFinished {
        worker: WorkerId,
        url: String,
        result: Result<PathBuf, FailureKind>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    pub url: String,
    pub title: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

/// What a finished batch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub workers: usize,
    pub written: Vec<WrittenPage>,
    pub skipped: Vec<SkippedUrl>,
    /// Workers whose task panicked. The URL each was on is in neither list.
    pub aborted_workers: usize,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}
