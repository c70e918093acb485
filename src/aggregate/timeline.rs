//! Monthly timeline

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};

use super::date_column;
use crate::error::Result;
use crate::models::EnrichedRecord;
use crate::utils::date::{first_of_next_month, month_end};

/// Number of records starting in one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    /// Last day of the month, used as the bucket label
    pub month_end: NaiveDate,
    pub count: usize,
}

/// Count records per calendar month of their start
///
/// Buckets run without gaps from the first to the last populated month;
/// months without records have a count of zero. Records without a start are
/// not counted.
pub fn monthly_timeline<'a, I>(records: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for start in records.into_iter().filter_map(EnrichedRecord::start) {
        let date = start.date();
        let first = date.with_day(1).unwrap_or(date);
        *counts.entry(first).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    let mut timeline = Vec::new();
    let mut month = Some(first);
    while let Some(current) = month.filter(|m| *m <= last) {
        timeline.push(MonthlyCount {
            month_end: month_end(current),
            count: counts.get(&current).copied().unwrap_or(0),
        });
        month = first_of_next_month(current);
    }
    timeline
}

/// Timeline as a two-column batch: `start` (month end) and `sanction_id`
/// (count)
pub fn timeline_batch(timeline: &[MonthlyCount]) -> Result<RecordBatch> {
    let counts: Vec<i64> = timeline
        .iter()
        .map(|m| i64::try_from(m.count).unwrap_or(i64::MAX))
        .collect();

    Ok(RecordBatch::try_from_iter(vec![
        ("start", date_column(timeline.iter().map(|m| m.month_end))),
        ("sanction_id", Arc::new(Int64Array::from(counts)) as ArrayRef),
    ])?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::{SanctionRecord, Validity};
    use crate::utils::io::csv::to_csv_string;

    fn starting(date: &str) -> EnrichedRecord {
        let start: Option<NaiveDateTime> = crate::utils::parse_date_string(date);
        EnrichedRecord {
            record: SanctionRecord::new(date, "e", "Person"),
            validity: Validity {
                start,
                end: None,
                active: true,
            },
            origin: None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_month() {
        let records = vec![starting("2015-01-01")];
        assert_eq!(
            monthly_timeline(&records),
            vec![MonthlyCount {
                month_end: ymd(2015, 1, 31),
                count: 1
            }]
        );
    }

    #[test]
    fn test_gaps_are_zero_filled() {
        let records = vec![
            starting("2015-11-20"),
            starting("2016-02-03"),
            starting("2015-11-02"),
        ];
        let timeline = monthly_timeline(&records);
        let counts: Vec<_> = timeline.iter().map(|m| (m.month_end, m.count)).collect();
        assert_eq!(
            counts,
            vec![
                (ymd(2015, 11, 30), 2),
                (ymd(2015, 12, 31), 0),
                (ymd(2016, 1, 31), 0),
                (ymd(2016, 2, 29), 1),
            ]
        );
    }

    #[test]
    fn test_empty_timeline() {
        let none: Vec<EnrichedRecord> = Vec::new();
        assert!(monthly_timeline(&none).is_empty());
        let batch = timeline_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
    }

    #[test]
    fn test_timeline_csv() {
        let records = vec![starting("2015-01-01")];
        let batch = timeline_batch(&monthly_timeline(&records)).unwrap();
        assert_eq!(
            to_csv_string(&batch).unwrap(),
            "start,sanction_id\n2015-01-31,1\n"
        );
    }
}
