//! CSV output for Arrow record batches

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Write `batch` to `path` as CSV with a header row
///
/// Null values are written as empty fields.
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    log_operation_start("Writing", path);
    let start = Instant::now();

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(file));
    writer.write(batch)?;
    writer.into_inner().flush()?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Render `batch` as CSV text
pub fn to_csv_string(batch: &RecordBatch) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buffer);
        writer.write(batch)?;
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array, StringArray};

    use super::*;

    #[test]
    fn test_nulls_render_empty() {
        let batch = RecordBatch::try_from_iter(vec![
            (
                "name",
                Arc::new(StringArray::from(vec![Some("a, b"), None])) as ArrayRef,
            ),
            ("count", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
        ])
        .unwrap();

        let csv = to_csv_string(&batch).unwrap();
        assert_eq!(csv, "name,count\n\"a, b\",1\n,2\n");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale").unwrap();

        let batch = RecordBatch::try_from_iter(vec![(
            "count",
            Arc::new(Int64Array::from(vec![7])) as ArrayRef,
        )])
        .unwrap();
        write_csv(&path, &batch).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "count\n7\n");
    }
}
