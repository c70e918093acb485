//! Daily pivot tables
//!
//! Records are grouped by a category key, counted per day within each
//! category's own date range, and laid out wide: one row per date, one column
//! per category.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::date_column;
use crate::config::PivotStyle;
use crate::error::Result;
use crate::lookup::{Language, SchemaCategory, flag};
use crate::models::EnrichedRecord;

/// One date row of a pivot table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    pub date: NaiveDate,
    /// Count per column; `None` where the date lies outside the column's range
    pub counts: Vec<Option<usize>>,
}

/// Wide table of daily counts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PivotTable {
    /// Category labels in ascending order
    pub columns: Vec<String>,
    /// Rows in ascending date order
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Count for a date and column label
    #[must_use]
    pub fn get(&self, date: NaiveDate, column: &str) -> Option<usize> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.date == date)
            .and_then(|r| r.counts[idx])
    }

    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }
}

/// Pivot daily record counts by `key`
///
/// Records without a start or without a key are skipped. Each category is
/// counted on every day from its first to its last record, so days without
/// records inside that range hold `Some(0)`.
pub fn daily_pivot<'a, I, F>(records: I, key: F) -> PivotTable
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
    F: Fn(&EnrichedRecord) -> Option<String>,
{
    let mut groups: BTreeMap<String, BTreeMap<NaiveDate, usize>> = BTreeMap::new();
    for record in records {
        let (Some(start), Some(label)) = (record.start(), key(record)) else {
            continue;
        };
        *groups
            .entry(label)
            .or_default()
            .entry(start.date())
            .or_insert(0) += 1;
    }

    // Contiguous daily series per category
    let series: Vec<(String, BTreeMap<NaiveDate, usize>)> = groups
        .into_iter()
        .map(|(label, days)| {
            let mut filled = BTreeMap::new();
            if let (Some(&first), Some(&last)) = (days.keys().next(), days.keys().next_back()) {
                for day in first.iter_days().take_while(|d| *d <= last) {
                    filled.insert(day, days.get(&day).copied().unwrap_or(0));
                }
            }
            (label, filled)
        })
        .collect();

    let dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|(_, days)| days.keys().copied())
        .collect();

    let rows = dates
        .into_iter()
        .map(|date| PivotRow {
            date,
            counts: series
                .iter()
                .map(|(_, days)| days.get(&date).copied())
                .collect(),
        })
        .collect();

    PivotTable {
        columns: series.into_iter().map(|(label, _)| label).collect(),
        rows,
    }
}

/// Daily counts per entity-type category, labelled in `language`
pub fn schema_pivot<'a, I>(records: I, language: Language) -> PivotTable
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    daily_pivot(records, |r| {
        Some(SchemaCategory::from_schema(r.record.schema_name()).label(language).to_string())
    })
}

/// Daily counts per origin, labelled with upper-case codes
pub fn origin_pivot<'a, I>(records: I) -> PivotTable
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    daily_pivot(records, |r| r.origin.as_ref().map(|o| o.to_uppercase()))
}

/// Display icon for a pivot column: the category icon for entity types, the
/// flag for origin codes
#[must_use]
pub fn column_icon(label: &str) -> String {
    SchemaCategory::from_label(label).map_or_else(|| flag(label), |c| c.icon().to_string())
}

/// Render a pivot table as a record batch
///
/// With the default style the batch has a `Date32` `start` column and
/// `Int64` count columns with missing cells set to zero. Any display option
/// switches all columns to strings so blank cells and the icon row can be
/// represented.
pub fn pivot_batch(table: &PivotTable, style: PivotStyle) -> Result<RecordBatch> {
    let mut rows: Vec<&PivotRow> = table.rows.iter().collect();
    if style.newest_first {
        rows.reverse();
    }

    let mut columns: Vec<(String, ArrayRef)> = Vec::with_capacity(table.columns.len() + 1);

    if !style.fill_blank && !style.icon_header {
        columns.push(("start".to_string(), date_column(rows.iter().map(|r| r.date))));
        for (idx, label) in table.columns.iter().enumerate() {
            let values: Vec<i64> = rows
                .iter()
                .map(|r| r.counts[idx].map_or(0, |c| i64::try_from(c).unwrap_or(i64::MAX)))
                .collect();
            columns.push((label.clone(), Arc::new(Int64Array::from(values)) as ArrayRef));
        }
        return Ok(RecordBatch::try_from_iter(columns)?);
    }

    let missing = if style.fill_blank { "" } else { "0" };
    let header = usize::from(style.icon_header);

    let mut dates: Vec<String> = Vec::with_capacity(rows.len() + header);
    if style.icon_header {
        dates.push(String::new());
    }
    dates.extend(rows.iter().map(|r| r.date.format("%Y-%m-%d").to_string()));
    columns.push(("start".to_string(), Arc::new(StringArray::from(dates)) as ArrayRef));

    for (idx, label) in table.columns.iter().enumerate() {
        let mut cells: Vec<String> = Vec::with_capacity(rows.len() + header);
        if style.icon_header {
            cells.push(column_icon(label));
        }
        cells.extend(
            rows.iter()
                .map(|r| r.counts[idx].map_or_else(|| missing.to_string(), |c| c.to_string())),
        );
        columns.push((label.clone(), Arc::new(StringArray::from(cells)) as ArrayRef));
    }

    Ok(RecordBatch::try_from_iter(columns)?)
}
