//! Shared startup code for the pagegrab binaries.
pub mod logging;
