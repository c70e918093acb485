//! Summary counts for the dashboard page

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::models::EnrichedRecord;

/// Partition of the filtered records relative to the recent cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Started before the cutoff
    Old,
    /// Started on or after the cutoff
    New,
    /// Every record
    All,
}

impl Partition {
    /// Whether `record` belongs to this partition
    #[must_use]
    pub fn contains(self, record: &EnrichedRecord, cutoff: NaiveDateTime) -> bool {
        match self {
            Self::Old => record.start().is_some_and(|s| s < cutoff),
            Self::New => record.start().is_some_and(|s| s >= cutoff),
            Self::All => true,
        }
    }
}

/// Sanction count and distinct sanctioned-entity count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub sanctions: usize,
    pub entities: usize,
}

impl Counts {
    fn of<'a>(records: impl IntoIterator<Item = &'a EnrichedRecord>) -> Self {
        let mut sanctions = 0;
        let mut entities = FxHashSet::default();
        for record in records {
            sanctions += 1;
            entities.insert(record.record.entity_id.as_str());
        }
        Self {
            sanctions,
            entities: entities.len(),
        }
    }
}

/// Counts of one partition, in total and broken down
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PartitionSummary {
    pub sanctions: usize,
    pub entities: usize,
    /// Per origin code; records without origin are left out
    pub origin: BTreeMap<String, Counts>,
    /// Per entity schema
    pub schema: BTreeMap<String, Counts>,
}

impl PartitionSummary {
    fn of(records: &[&EnrichedRecord]) -> Self {
        let total = Counts::of(records.iter().copied());

        let mut by_origin: BTreeMap<String, Vec<&EnrichedRecord>> = BTreeMap::new();
        let mut by_schema: BTreeMap<String, Vec<&EnrichedRecord>> = BTreeMap::new();
        for record in records.iter().copied() {
            if let Some(origin) = &record.origin {
                by_origin.entry(origin.clone()).or_default().push(record);
            }
            by_schema
                .entry(record.record.schema_name().to_string())
                .or_default()
                .push(record);
        }

        Self {
            sanctions: total.sanctions,
            entities: total.entities,
            origin: by_origin
                .into_iter()
                .map(|(k, v)| (k, Counts::of(v)))
                .collect(),
            schema: by_schema
                .into_iter()
                .map(|(k, v)| (k, Counts::of(v)))
                .collect(),
        }
    }
}

/// Metadata document injected into the dashboard page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaSummary {
    pub old: PartitionSummary,
    pub new: PartitionSummary,
    pub all: PartitionSummary,
    /// Run start, ISO 8601
    pub last_updated: String,
}

/// Summarize the filtered records around the recent cutoff
#[must_use]
pub fn summarize(
    records: &[EnrichedRecord],
    recent_start: NaiveDateTime,
    now: NaiveDateTime,
) -> MetaSummary {
    let summary = |partition: Partition| {
        let members: Vec<&EnrichedRecord> = records
            .iter()
            .filter(|r| partition.contains(r, recent_start))
            .collect();
        PartitionSummary::of(&members)
    };

    MetaSummary {
        old: summary(Partition::Old),
        new: summary(Partition::New),
        all: summary(Partition::All),
        last_updated: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    }
}
