use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use pagegrab_core::{advance, output_file_name, ExtractionContext, WorkerState, WorkerStep};
use pagegrab_logging::{grab_debug, grab_error, grab_info, grab_warn};

use crate::events::{EventSink, LogSink};
use crate::extract::PageExtractor;
use crate::persist::OutputWriter;
use crate::queue::WorkQueue;
use crate::{BatchEvent, BatchReport, FailureKind, SkippedUrl, WorkerId, WrittenPage};

/// Fixed number of workers draining one shared queue.
#[derive(Clone)]
pub struct WorkerPool {
    workers: usize,
    pages: PageExtractor,
    writer: OutputWriter,
    sink: Arc<dyn EventSink>,
}

impl WorkerPool {
    /// `workers` is clamped to at least one.
    pub fn new(workers: usize, pages: PageExtractor, writer: OutputWriter) -> Self {
        Self {
            workers: workers.max(1),
            pages,
            writer,
            sink: Arc::new(LogSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queue the whole batch, run every worker until the queue is drained,
    /// and collect what each of them did. Must run inside a tokio runtime.
    pub async fn run(&self, urls: Vec<String>) -> BatchReport {
        let total = urls.len();
        let queue = Arc::new(WorkQueue::preloaded(urls));
        grab_info!(
            "Starting batch: {} urls, {} workers, output {}",
            total,
            self.workers,
            self.writer.dir().display()
        );

        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
        let handles: Vec<_> = (0..self.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    state: WorkerState::Idle,
                    queue: queue.clone(),
                    pages: self.pages.clone(),
                    writer: self.writer.clone(),
                    sink: self.sink.clone(),
                    outcomes: outcome_tx.clone(),
                };
                tokio::spawn(worker.run())
            })
            .collect();
        drop(outcome_tx);

        let mut report = BatchReport {
            workers: self.workers,
            ..BatchReport::default()
        };
        for (id, handle) in handles.into_iter().enumerate() {
            if let Err(err) = handle.await {
                report.aborted_workers += 1;
                grab_error!("worker={} task aborted: {}", id, err);
            }
        }

        // Every sender is gone once the workers have finished, so this drains and stops.
        while let Some(outcome) = outcome_rx.recv().await {
            match outcome {
                UrlOutcome::Written(page) => report.written.push(page),
                UrlOutcome::Skipped(skipped) => report.skipped.push(skipped),
            }
        }
        if report.aborted_workers > 0 {
            grab_warn!(
                "{} worker(s) aborted; {} of {} urls accounted for",
                report.aborted_workers,
                report.processed(),
                total
            );
        }
        report
    }
}

/// Sent to the coordinator as soon as a URL is done, so a worker that dies
/// later cannot take earlier results with it.
enum UrlOutcome {
    Written(WrittenPage),
    Skipped(SkippedUrl),
}

struct Worker {
    id: WorkerId,
    state: WorkerState,
    queue: Arc<WorkQueue>,
    pages: PageExtractor,
    writer: OutputWriter,
    sink: Arc<dyn EventSink>,
    outcomes: mpsc::UnboundedSender<UrlOutcome>,
}

impl Worker {
    async fn run(mut self) {
        let mut ctx = ExtractionContext::new();
        let (mut written, mut skipped) = (0usize, 0usize);

        while let Some(url) = self.queue.next().await {
            self.step(WorkerStep::Pulled, Some(&url));

            if let Err(err) = self.pages.visit(&url, &mut ctx).await {
                self.step(WorkerStep::FetchFailed, Some(&url));
                grab_warn!("Error visiting URL {}: {}", url, err);
                self.finish(&url, Err(err.kind.clone()));
                skipped += 1;
                self.report(UrlOutcome::Skipped(SkippedUrl {
                    url,
                    kind: err.kind,
                    message: err.message,
                }));
                continue;
            }
            self.step(WorkerStep::Fetched, Some(&url));

            let page = ctx.take();
            grab_info!("Title for {}: {:?}", url, page.title);
            let file_name = output_file_name(&page.title);
            match self.writer.write_async(file_name.clone(), page.content).await {
                Ok(path) => {
                    self.step(WorkerStep::Written, Some(&url));
                    self.finish(&url, Ok(path.clone()));
                    written += 1;
                    self.report(UrlOutcome::Written(WrittenPage {
                        url,
                        title: page.title,
                        path,
                    }));
                }
                Err(err) => {
                    self.step(WorkerStep::WriteFailed, Some(&url));
                    grab_warn!("Could not write {} for {}: {}", file_name, url, err);
                    self.finish(&url, Err(FailureKind::Write));
                    skipped += 1;
                    self.report(UrlOutcome::Skipped(SkippedUrl {
                        url,
                        kind: FailureKind::Write,
                        message: err.to_string(),
                    }));
                }
            }
        }

        self.step(WorkerStep::QueueDrained, None);
        grab_debug!(
            "worker={} drained after {} written, {} skipped",
            self.id,
            written,
            skipped
        );
    }

    fn report(&self, outcome: UrlOutcome) {
        if self.outcomes.send(outcome).is_err() {
            grab_error!("worker={}: coordinator stopped listening", self.id);
        }
    }

    fn step(&mut self, step: WorkerStep, url: Option<&str>) {
        match advance(self.state, step) {
            Ok(next) => {
                self.state = next;
                self.sink.emit(BatchEvent::StageChanged {
                    worker: self.id,
                    url: url.map(str::to_string),
                    stage: next,
                });
            }
            Err(err) => grab_error!("worker={}: {}", self.id, err),
        }
    }

    fn finish(&self, url: &str, result: Result<PathBuf, FailureKind>) {
        self.sink.emit(BatchEvent::UrlFinished {
            worker: self.id,
            url: url.to_string(),
            result,
        });
    }
}
