use std::sync::Once;

use pagegrab_core::{advance, InvalidTransition, WorkerState, WorkerStep};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pagegrab_logging::initialize_for_tests);
}

fn run(steps: &[WorkerStep]) -> Result<WorkerState, InvalidTransition> {
    steps
        .iter()
        .try_fold(WorkerState::default(), |state, step| advance(state, *step))
}

#[test]
fn successful_url_returns_worker_to_idle() {
    init_logging();
    let state = run(&[WorkerStep::Pulled, WorkerStep::Fetched, WorkerStep::Written]);
    assert_eq!(state, Ok(WorkerState::Idle));
}

#[test]
fn failures_return_worker_to_idle() {
    init_logging();
    assert_eq!(
        run(&[WorkerStep::Pulled, WorkerStep::FetchFailed]),
        Ok(WorkerState::Idle)
    );
    assert_eq!(
        run(&[WorkerStep::Pulled, WorkerStep::Fetched, WorkerStep::WriteFailed]),
        Ok(WorkerState::Idle)
    );
}

#[test]
fn draining_is_terminal() {
    init_logging();
    let drained = run(&[
        WorkerStep::Pulled,
        WorkerStep::Fetched,
        WorkerStep::Written,
        WorkerStep::QueueDrained,
    ]);
    assert_eq!(drained, Ok(WorkerState::Drained));

    let err = advance(WorkerState::Drained, WorkerStep::Pulled).unwrap_err();
    assert_eq!(
        err,
        InvalidTransition {
            from: WorkerState::Drained,
            step: WorkerStep::Pulled,
        }
    );
}

#[test]
fn writing_requires_a_successful_fetch() {
    init_logging();
    assert!(advance(WorkerState::Idle, WorkerStep::Written).is_err());
    assert!(advance(WorkerState::Fetching, WorkerStep::Written).is_err());
    assert!(advance(WorkerState::Writing, WorkerStep::Pulled).is_err());
    assert!(advance(WorkerState::Fetching, WorkerStep::QueueDrained).is_err());
}
