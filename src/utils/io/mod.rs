//! IO utilities for writing pipeline artifacts
//!
//! Every artifact is written in full and replaces any previous file at the
//! same path.

pub mod csv;
pub mod json;

use std::fs;
use std::path::Path;

use crate::error::Result;

pub use self::csv::write_csv;
pub use self::json::write_json;

/// Create `dir` and its parents if they do not exist yet
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        log::debug!("Creating output directory {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
