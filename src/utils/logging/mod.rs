//! Logging utilities for operations and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{load_summary, log_load_complete, log_load_start, log_warning};
pub use progress::{create_spinner, finish_and_clear};
