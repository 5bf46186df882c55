use pagegrab_logging::grab_error;
use tokio::sync::{mpsc, Mutex};

/// Closed, pre-filled FIFO of URLs shared by every worker.
///
/// The whole batch is enqueued and the sender dropped before any worker
/// runs, so `next` yields each URL to exactly one caller and then `None`
/// forever.
#[derive(Debug)]
pub struct WorkQueue {
    rx: Mutex<mpsc::Receiver<String>>,
    capacity: usize,
}

impl WorkQueue {
    pub fn preloaded(urls: Vec<String>) -> Self {
        // tokio rejects zero-capacity channels; an empty batch still gets one slot.
        let capacity = urls.len().max(1);
        let (tx, rx) = mpsc::channel(capacity);
        for url in urls {
            // Capacity covers the batch and the receiver is alive.
            if let Err(err) = tx.try_send(url) {
                grab_error!("could not queue {}: channel rejected send", err.into_inner());
            }
        }
        drop(tx);
        Self {
            rx: Mutex::new(rx),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn next(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}
