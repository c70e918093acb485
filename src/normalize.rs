//! Record normalization
//!
//! Derives the validity window (`start`, `end`, `active`) and the single
//! `origin` code from the raw, multi-valued properties of a record.

use chrono::NaiveDateTime;

use crate::models::{EnrichedRecord, SanctionRecord, Validity};
use crate::utils::date::{earliest, latest};

/// Computes derived fields relative to a fixed `now`
///
/// `now` is captured once per run so every record is judged against the same
/// instant.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    now: NaiveDateTime,
}

impl Normalizer {
    #[must_use]
    pub const fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Normalizer pinned to the current local time
    #[must_use]
    pub fn at_current_time() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }

    #[must_use]
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Validity window of a record
    #[must_use]
    pub fn normalize(&self, record: &SanctionRecord) -> Validity {
        Validity::at(start_of(record), end_of(record), self.now)
    }

    /// Wrap a record with its derived fields
    #[must_use]
    pub fn enrich(&self, record: SanctionRecord) -> EnrichedRecord {
        let validity = self.normalize(&record);
        let origin = origin_of(&record);
        EnrichedRecord {
            record,
            validity,
            origin,
        }
    }

    /// Enrich every record, preserving order
    #[must_use]
    pub fn enrich_all(&self, records: Vec<SanctionRecord>) -> Vec<EnrichedRecord> {
        records.into_iter().map(|r| self.enrich(r)).collect()
    }
}

/// Earliest `startDate`, else earliest `date`
///
/// The first non-empty list decides; when none of its values parse the start
/// is unknown.
#[must_use]
pub fn start_of(record: &SanctionRecord) -> Option<NaiveDateTime> {
    if !record.start_date.is_empty() {
        earliest(&record.start_date)
    } else if !record.date.is_empty() {
        earliest(&record.date)
    } else {
        None
    }
}

/// Latest `endDate`
#[must_use]
pub fn end_of(record: &SanctionRecord) -> Option<NaiveDateTime> {
    latest(&record.end_date)
}

/// First country code attached to the sanction
#[must_use]
pub fn origin_of(record: &SanctionRecord) -> Option<String> {
    record.origin.first().cloned()
}
