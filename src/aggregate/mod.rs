//! Time-series and summary aggregations over the filtered records
//!
//! - `timeline`: record counts per calendar month
//! - `pivot`: daily counts per category in the recent window, pivoted wide
//! - `meta`: totals and distinct entities for the old/new/all partitions

pub mod meta;
pub mod pivot;
pub mod timeline;

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array};
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::EnrichedRecord;

pub use meta::{Counts, MetaSummary, Partition, PartitionSummary, summarize};
pub use pivot::{PivotRow, PivotTable, daily_pivot, origin_pivot, pivot_batch, schema_pivot};
pub use timeline::{MonthlyCount, monthly_timeline, timeline_batch};

/// Records whose start lies on or after `recent_start`
pub fn recent_records<'a>(
    records: &'a [EnrichedRecord],
    recent_start: NaiveDateTime,
) -> Vec<&'a EnrichedRecord> {
    records
        .iter()
        .filter(|r| r.start().is_some_and(|s| s >= recent_start))
        .collect()
}

/// Days since the Unix epoch, as stored in Arrow `Date32` columns
fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    i32::try_from((date - epoch).num_days()).unwrap_or(i32::MAX)
}

/// Arrow date column for a sequence of calendar dates
fn date_column(dates: impl IntoIterator<Item = NaiveDate>) -> ArrayRef {
    Arc::new(Date32Array::from(
        dates.into_iter().map(days_since_epoch).collect::<Vec<_>>(),
    ))
}
