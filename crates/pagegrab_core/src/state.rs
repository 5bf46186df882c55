use thiserror::Error;

/// Lifecycle of one worker in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerState {
    #[default]
    Idle,
    Fetching,
    Writing,
    Drained,
}

/// What just happened to a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStep {
    /// Pulled a URL from the queue.
    Pulled,
    /// Fetch and extraction succeeded.
    Fetched,
    /// Fetch or extraction failed; the URL is skipped.
    FetchFailed,
    /// Output file written.
    Written,
    /// Output file could not be written; the URL is skipped.
    WriteFailed,
    /// The queue is closed and empty.
    QueueDrained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("worker cannot take step {step:?} while {from:?}")]
pub struct InvalidTransition {
    pub from: WorkerState,
    pub step: WorkerStep,
}

/// Pure transition function: `Idle -> Fetching -> Writing -> Idle` per URL,
/// `Idle -> Drained` once the queue is exhausted. `Drained` is terminal.
pub fn advance(state: WorkerState, step: WorkerStep) -> Result<WorkerState, InvalidTransition> {
    use WorkerState::*;
    use WorkerStep::*;

    match (state, step) {
        (Idle, Pulled) => Ok(Fetching),
        (Idle, QueueDrained) => Ok(Drained),
        (Fetching, Fetched) => Ok(Writing),
        (Fetching, FetchFailed) => Ok(Idle),
        (Writing, Written) | (Writing, WriteFailed) => Ok(Idle),
        (from, step) => Err(InvalidTransition { from, step }),
    }
}
