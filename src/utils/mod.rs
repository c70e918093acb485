//! Utilities shared across the pipeline stages
//!
//! Date coercion, artifact writers and logging helpers.

pub mod date;
pub mod io;
pub mod logging;

pub use date::parse_date_string;
pub use io::{ensure_directory, write_csv, write_json};
