//! Detail table builder
//!
//! Turns each filtered record into one display row: multi-valued fields are
//! flattened into single strings, dates lose their time of day, the entity
//! schema becomes an icon and known authorities get a region flag. Identical
//! rows are collapsed before the table is converted to an Arrow batch.

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::config::{AuthorityStyle, IconFallback, PipelineConfig};
use crate::error::Result;
use crate::lookup::{
    GLOBAL_REGION_ICON, authority_region, country_name, flag, global_region_name, schema_icon,
};
use crate::models::EnrichedRecord;

/// Separator between flattened values
pub const VALUE_SEPARATOR: &str = "; ";

/// One row of the detail table; `None` renders as an empty cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailRow {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub authority: Option<String>,
    #[serde(rename = "sourceurl")]
    pub source_url: Option<String>,
}

/// Flatten a multi-valued field into one string
///
/// Values are ordered by length, shortest first, keeping the input order
/// among values of equal length. An already flattened single value comes
/// back unchanged.
#[must_use]
pub fn join_values<S: AsRef<str>>(values: &[S]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(AsRef::as_ref)
            .sorted_by_key(|v| v.chars().count())
            .join(VALUE_SEPARATOR),
    )
}

/// Markdown link with the given label
#[must_use]
pub fn markdown_url(url: &str, label: &str) -> String {
    format!("[{label}]({url})")
}

/// Prefix an authority with its region flag and name when known
#[must_use]
pub fn annotate_authority(authority: &str, origin: Option<&str>, style: AuthorityStyle) -> String {
    match style {
        AuthorityStyle::Lookup => authority_region(authority)
            .and_then(|iso| country_name(iso).map(|name| (iso, name)))
            .map_or_else(
                || authority.to_string(),
                |(iso, name)| format!("{} {name} | {authority}", flag(iso)),
            ),
        AuthorityStyle::OriginFirst => {
            let origin = origin.map(str::to_lowercase);
            let code = origin
                .as_deref()
                .filter(|o| country_name(o).is_some())
                .or_else(|| authority_region(authority));

            match code {
                Some(iso) => {
                    if let Some(name) = country_name(iso) {
                        format!("{} {name} | {authority}", flag(iso))
                    } else if let Some(name) = global_region_name(iso) {
                        format!("{GLOBAL_REGION_ICON} {name} | {authority}")
                    } else {
                        authority.to_string()
                    }
                }
                None => authority.to_string(),
            }
        }
    }
}

/// Builds detail rows according to the presentation settings
#[derive(Debug, Clone)]
pub struct TableBuilder {
    source_label: String,
    icon_fallback: IconFallback,
    authority_style: AuthorityStyle,
}

impl TableBuilder {
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            source_label: config.source_label.clone(),
            icon_fallback: config.icon_fallback,
            authority_style: config.authority_style,
        }
    }

    /// Display row for one record
    #[must_use]
    pub fn build_row(&self, enriched: &EnrichedRecord) -> DetailRow {
        let record = &enriched.record;
        let use_fallback = self.icon_fallback == IconFallback::Fallback;

        DetailRow {
            name: join_values(&record.name),
            icon: schema_icon(record.schema_name(), use_fallback).map(str::to_string),
            start: enriched
                .validity
                .start_date()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            end: enriched
                .validity
                .end_date()
                .map(|d| d.format("%Y-%m-%d").to_string()),
            authority: join_values(&record.authority).map(|a| {
                annotate_authority(&a, enriched.origin.as_deref(), self.authority_style)
            }),
            source_url: record
                .source_url
                .first()
                .map(|url| markdown_url(url, &self.source_label)),
        }
    }

    /// Deduplicated display rows in input order
    #[must_use]
    pub fn build(&self, records: &[EnrichedRecord]) -> Vec<DetailRow> {
        deduplicate(records.iter().map(|r| self.build_row(r)))
    }
}

/// Drop exact duplicate rows, keeping the first occurrence
pub fn deduplicate(rows: impl IntoIterator<Item = DetailRow>) -> Vec<DetailRow> {
    let mut seen = FxHashSet::default();
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Convert detail rows to an Arrow record batch
pub fn to_record_batch(rows: &[DetailRow]) -> Result<RecordBatch> {
    let fields = Vec::<FieldRef>::from_type::<DetailRow>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::SanctionRecord;
    use crate::normalize::Normalizer;

    fn enrich(record: SanctionRecord) -> EnrichedRecord {
        Normalizer::new(
            NaiveDate::from_ymd_opt(2022, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
        .enrich(record)
    }

    #[test]
    fn test_join_sorts_by_length_stably() {
        let values = ["ccc", "a", "bb", "d"];
        assert_eq!(join_values(&values).as_deref(), Some("a; d; bb; ccc"));
        assert_eq!(join_values::<&str>(&[]), None);
    }

    #[test]
    fn test_join_is_idempotent() {
        let joined = join_values(&["Ivan Petrov", "I. Petrov"]).unwrap();
        assert_eq!(join_values(&[joined.as_str()]), Some(joined));
    }

    #[test]
    fn test_authority_lookup_annotation() {
        assert_eq!(
            annotate_authority(
                "Office of Foreign Assets Control (OFAC)",
                None,
                AuthorityStyle::Lookup
            ),
            ":us: USA | Office of Foreign Assets Control (OFAC)"
        );
        // `eu` has no country entry
        assert_eq!(
            annotate_authority("European External Action Service", None, AuthorityStyle::Lookup),
            "European External Action Service"
        );
        assert_eq!(
            annotate_authority("Unknown Body", Some("ua"), AuthorityStyle::Lookup),
            "Unknown Body"
        );
    }

    #[test]
    fn test_authority_origin_first_annotation() {
        assert_eq!(
            annotate_authority("Unknown Body", Some("ch"), AuthorityStyle::OriginFirst),
            ":ch: Schweiz | Unknown Body"
        );
        assert_eq!(
            annotate_authority(
                "Office of Foreign Assets Control (OFAC)",
                Some("ru"),
                AuthorityStyle::OriginFirst
            ),
            ":us: USA | Office of Foreign Assets Control (OFAC)"
        );
        assert_eq!(
            annotate_authority(
                "United Nations Security Council (UN SC)",
                None,
                AuthorityStyle::OriginFirst
            ),
            ":globe_with_meridians: UN | United Nations Security Council (UN SC)"
        );
        assert_eq!(
            annotate_authority("World Bank", None, AuthorityStyle::OriginFirst),
            "World Bank"
        );
    }

    #[test]
    fn test_build_row() {
        let builder = TableBuilder::new(&PipelineConfig::default());
        let row = builder.build_row(&enrich(
            SanctionRecord::new("s1", "e1", "Vessel")
                .with_names(&["Sea Star", "Star"])
                .with_start_date(&["2015-01-01T08:00:00"])
                .with_authority(&["Office of Foreign Assets Control (OFAC)"])
                .with_source_url(&["https://example.org/a", "https://example.org/b"]),
        ));

        assert_eq!(row.name.as_deref(), Some("Star; Sea Star"));
        assert_eq!(row.icon.as_deref(), Some(crate::lookup::FALLBACK_ICON));
        assert_eq!(row.start.as_deref(), Some("2015-01-01"));
        assert_eq!(row.end, None);
        assert_eq!(
            row.source_url.as_deref(),
            Some("[Quelle](https://example.org/a)")
        );
    }

    #[test]
    fn test_unknown_schema_without_fallback() {
        let config = PipelineConfig {
            icon_fallback: IconFallback::Omit,
            ..PipelineConfig::default()
        };
        let row = TableBuilder::new(&config).build_row(&enrich(SanctionRecord::new("s", "e", "Vessel")));
        assert_eq!(row.icon, None);
    }

    #[test]
    fn test_build_deduplicates_and_is_repeatable() {
        let builder = TableBuilder::new(&PipelineConfig::default());
        let base = SanctionRecord::new("s1", "e1", "Person")
            .with_names(&["Ivan"])
            .with_start_date(&["2015-01-01"]);
        let records = vec![
            enrich(base.clone()),
            enrich(SanctionRecord {
                sanction_id: "s2".to_string(),
                ..base.clone()
            }),
            enrich(base.with_names(&["Olga"])),
        ];

        let first = builder.build(&records);
        assert_eq!(first.len(), 2);
        assert_eq!(first, builder.build(&records));
        assert_eq!(deduplicate(first.clone()), first);
    }

    #[test]
    fn test_rows_differing_only_in_hidden_fields_collapse() {
        let builder = TableBuilder::new(&PipelineConfig::default());
        let base = SanctionRecord::new("s1", "e1", "Person")
            .with_names(&["Ivan"])
            .with_start_date(&["2015-01-01"])
            .with_program(&["UKRAINE-EO13660"])
            .with_reason(&["Annexation of Crimea"]);
        let records = vec![
            enrich(base.clone()),
            enrich(
                SanctionRecord {
                    sanction_id: "s2".to_string(),
                    ..base.clone()
                }
                .with_program(&["RUSSIA-EO14024"]),
            ),
            enrich(base.with_reason(&["Other"]).with_countries(&["ru", "ua"])),
        ];

        assert_eq!(builder.build(&records).len(), 1);
    }

    #[test]
    fn test_to_record_batch() {
        let builder = TableBuilder::new(&PipelineConfig::default());
        let rows = builder.build(&[enrich(
            SanctionRecord::new("s1", "e1", "Person").with_start_date(&["2015-01-01"]),
        )]);

        let batch = to_record_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 1);
        let names: Vec<_> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(
            names,
            vec!["name", "icon", "start", "end", "authority", "sourceurl"]
        );
    }
}
