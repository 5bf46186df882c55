use pagegrab_logging::{grab_debug, grab_info, grab_trace};

use crate::BatchEvent;

/// Observer for worker activity. Never influences control flow.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

/// Default sink: every event becomes a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: BatchEvent) {
        match event {
            BatchEvent::StageChanged { worker, url, stage } => {
                grab_trace!("worker={} stage={:?} url={:?}", worker, stage, url);
            }
            BatchEvent::UrlFinished {
                worker,
                url,
                result: Ok(path),
            } => {
                grab_info!("worker={} wrote {} for {}", worker, path.display(), url);
            }
            BatchEvent::UrlFinished {
                worker,
                url,
                result: Err(kind),
            } => {
                grab_debug!("worker={} skipped {}: {}", worker, url, kind);
            }
        }
    }
}
