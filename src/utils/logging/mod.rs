//! Logging utilities for stage reporting and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{log_operation_complete, log_operation_start, log_stage_count};
pub use self::progress::{create_spinner, finish_and_clear};
