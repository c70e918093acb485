//! JSON output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Serialize `value` to `path` as compact JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    log_operation_start("Writing", path);

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;

    log_operation_complete("wrote", path, 1, None);
    Ok(())
}
