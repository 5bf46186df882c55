//! Pagegrab core: pure title sanitizing, extraction buffers and the worker state machine.
mod extraction;
mod sanitize;
mod state;

pub use extraction::{ExtractionContext, ExtractionResult};
pub use sanitize::{output_file_name, sanitize_title, RESERVED_CHARS, UNTITLED_STEM};
pub use state::{advance, InvalidTransition, WorkerState, WorkerStep};
