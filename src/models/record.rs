//! Sanction record model

use chrono::{NaiveDate, NaiveDateTime};

/// One row of the sanction × sanctioned-entity join
///
/// Multi-valued properties are kept as they come from the store; an empty
/// vector means the property was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanctionRecord {
    /// ID of the sanction entity
    pub sanction_id: String,
    /// ID of the sanctioned entity
    pub entity_id: String,
    /// Display caption of the sanction
    pub caption: Option<String>,
    /// Schema of the sanctioned entity (`Person`, `Company`, ...)
    pub schema: Option<String>,
    /// Names of the sanctioned entity
    pub name: Vec<String>,
    /// Sanction programs
    pub program: Vec<String>,
    /// Stated reasons
    pub reason: Vec<String>,
    /// Country codes attached to the sanction
    pub origin: Vec<String>,
    /// Issuing bodies
    pub authority: Vec<String>,
    /// Source URLs
    pub source_url: Vec<String>,
    /// Raw `startDate` values
    pub start_date: Vec<String>,
    /// Raw `endDate` values
    pub end_date: Vec<String>,
    /// Raw `date` values
    pub date: Vec<String>,
    /// Country codes of the sanctioned entity
    pub countries: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl SanctionRecord {
    /// Create a record for a sanction against an entity of the given schema
    pub fn new(
        sanction_id: impl Into<String>,
        entity_id: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            sanction_id: sanction_id.into(),
            entity_id: entity_id.into(),
            schema: Some(schema.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.name = owned(names);
        self
    }

    #[must_use]
    pub fn with_program(mut self, program: &[&str]) -> Self {
        self.program = owned(program);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: &[&str]) -> Self {
        self.reason = owned(reason);
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: &[&str]) -> Self {
        self.origin = owned(origin);
        self
    }

    #[must_use]
    pub fn with_authority(mut self, authority: &[&str]) -> Self {
        self.authority = owned(authority);
        self
    }

    #[must_use]
    pub fn with_source_url(mut self, urls: &[&str]) -> Self {
        self.source_url = owned(urls);
        self
    }

    #[must_use]
    pub fn with_start_date(mut self, dates: &[&str]) -> Self {
        self.start_date = owned(dates);
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, dates: &[&str]) -> Self {
        self.end_date = owned(dates);
        self
    }

    #[must_use]
    pub fn with_date(mut self, dates: &[&str]) -> Self {
        self.date = owned(dates);
        self
    }

    #[must_use]
    pub fn with_countries(mut self, countries: &[&str]) -> Self {
        self.countries = owned(countries);
        self
    }

    /// Schema label, empty when unknown
    #[must_use]
    pub fn schema_name(&self) -> &str {
        self.schema.as_deref().unwrap_or_default()
    }
}

/// Derived validity window of a sanction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validity {
    /// Earliest start date, falling back to the earliest generic date
    pub start: Option<NaiveDateTime>,
    /// Latest end date
    pub end: Option<NaiveDateTime>,
    /// Started in the past and not yet ended
    pub active: bool,
}

impl Validity {
    /// Derive the window from known bounds relative to `now`
    ///
    /// Never active without a start.
    #[must_use]
    pub fn at(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>, now: NaiveDateTime) -> Self {
        let active = match (start, end) {
            (Some(start), _) if start >= now => false,
            (Some(_), Some(end)) => end > now,
            (Some(_), None) => true,
            (None, _) => false,
        };
        Self { start, end, active }
    }

    /// Start as a calendar date
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.map(|s| s.date())
    }

    /// End as a calendar date
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|e| e.date())
    }
}

/// A record enriched with its derived fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub record: SanctionRecord,
    pub validity: Validity,
    /// First country code attached to the sanction
    pub origin: Option<String>,
}

impl EnrichedRecord {
    #[must_use]
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.validity.start
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.validity.end
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.validity.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_validity_without_start_is_inactive() {
        let now = at(2022, 6, 1);
        assert!(!Validity::at(None, None, now).active);
        assert!(!Validity::at(None, Some(at(2030, 1, 1)), now).active);
    }

    #[test]
    fn test_validity_window() {
        let now = at(2022, 6, 1);
        assert!(Validity::at(Some(at(2015, 1, 1)), None, now).active);
        assert!(Validity::at(Some(at(2015, 1, 1)), Some(at(2030, 1, 1)), now).active);
        assert!(!Validity::at(Some(at(2015, 1, 1)), Some(at(2016, 1, 1)), now).active);
        assert!(!Validity::at(Some(at(2023, 1, 1)), None, now).active);
        assert!(!Validity::at(Some(now), None, now).active);
    }

    #[test]
    fn test_record_builder() {
        let record = SanctionRecord::new("s1", "e1", "Person")
            .with_names(&["Ivan"])
            .with_countries(&["ru"]);

        assert_eq!(record.schema_name(), "Person");
        assert_eq!(record.name, vec!["Ivan".to_string()]);
        assert!(record.program.is_empty());
    }
}
