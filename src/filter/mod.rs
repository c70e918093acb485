//! Population filtering
//!
//! Narrows the enriched records down to the target population: active
//! sanctions against entities of a given country that started after a cutoff.
//! Filters are applied as a chain so each stage can report how many records
//! remain.

use chrono::NaiveDateTime;

use crate::config::PipelineConfig;
use crate::models::EnrichedRecord;
use crate::utils::logging::log_stage_count;

/// Defines a criterion for filtering records
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A filter that can be applied to an enriched sanction record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanctionFilter {
    /// Sanction is currently in force
    Active,
    /// Sanctioned entity is associated with a country code (case-insensitive)
    Country(String),
    /// Start strictly after the given instant; unknown starts never match
    StartedAfter(NaiveDateTime),
    /// Start strictly before the given instant; unknown starts never match
    StartedBefore(NaiveDateTime),
    /// Combined filter that requires all criteria to be met
    All(Vec<SanctionFilter>),
    /// Combined filter that requires any criterion to be met
    Any(Vec<SanctionFilter>),
}

impl FilterCriteria<EnrichedRecord> for SanctionFilter {
    fn meets_criteria(&self, record: &EnrichedRecord) -> bool {
        match self {
            Self::Active => record.is_active(),
            Self::Country(code) => {
                let code = code.to_lowercase();
                record
                    .record
                    .countries
                    .iter()
                    .any(|c| c.to_lowercase() == code)
            }
            Self::StartedAfter(cutoff) => record.start().is_some_and(|s| s > *cutoff),
            Self::StartedBefore(cutoff) => record.start().is_some_and(|s| s < *cutoff),
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(record)),
            Self::Any(filters) => filters.iter().any(|f| f.meets_criteria(record)),
        }
    }
}

/// One labelled step of a filter chain
#[derive(Debug, Clone)]
pub struct FilterStage {
    /// Log label for the count after this stage
    pub label: String,
    pub filter: SanctionFilter,
}

/// Sequence of filters applied one after another
///
/// The combined result does not depend on stage order; order only affects
/// the counts that get logged.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    #[must_use]
    pub fn stage(mut self, label: impl Into<String>, filter: SanctionFilter) -> Self {
        self.stages.push(FilterStage {
            label: label.into(),
            filter,
        });
        self
    }

    /// The dashboard population: active, associated with the target country,
    /// started after January 1 of the cutoff year
    #[must_use]
    pub fn for_config(config: &PipelineConfig) -> Self {
        Self::new()
            .stage("Active entries", SanctionFilter::Active)
            .stage(
                format!("Entries against `{}` targets", config.target_country),
                SanctionFilter::Country(config.target_country.clone()),
            )
            .stage(
                format!(
                    "Entries against `{}` targets since {}",
                    config.target_country, config.cutoff_year
                ),
                SanctionFilter::StartedAfter(config.cutoff_start()),
            )
    }

    #[must_use]
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// All stages as one combined filter
    #[must_use]
    pub fn combined(&self) -> SanctionFilter {
        SanctionFilter::All(self.stages.iter().map(|s| s.filter.clone()).collect())
    }

    /// Apply each stage in turn, logging the remaining count after each one
    #[must_use]
    pub fn apply(&self, records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
        self.stages.iter().fold(records, |records, stage| {
            let kept: Vec<EnrichedRecord> = records
                .into_iter()
                .filter(|r| stage.filter.meets_criteria(r))
                .collect();
            log_stage_count(&stage.label, kept.len());
            kept
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::SanctionRecord;
    use crate::normalize::Normalizer;

    fn normalizer() -> Normalizer {
        Normalizer::new(
            NaiveDate::from_ymd_opt(2022, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn records() -> Vec<EnrichedRecord> {
        let n = normalizer();
        n.enrich_all(vec![
            SanctionRecord::new("a", "e1", "Person")
                .with_start_date(&["2015-01-01"])
                .with_countries(&["RU"]),
            SanctionRecord::new("b", "e2", "Company")
                .with_start_date(&["2010-01-01"])
                .with_end_date(&["2011-01-01"])
                .with_countries(&["ru"]),
            SanctionRecord::new("c", "e3", "Person")
                .with_start_date(&["2013-05-01"])
                .with_countries(&["ru", "ua"]),
            SanctionRecord::new("d", "e4", "Person").with_start_date(&["2020-01-01"]),
            SanctionRecord::new("e", "e5", "Person")
                .with_start_date(&["2014-01-01"])
                .with_countries(&["ru"]),
        ])
    }

    fn ids(records: &[EnrichedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.record.sanction_id.as_str()).collect()
    }

    #[test]
    fn test_country_filter_is_case_insensitive_and_skips_missing() {
        let filter = SanctionFilter::Country("ru".to_string());
        let kept: Vec<_> = records()
            .into_iter()
            .filter(|r| filter.meets_criteria(r))
            .collect();
        assert_eq!(ids(&kept), vec!["a", "b", "c", "e"]);
    }

    #[test]
    fn test_cutoff_is_strict() {
        let config = PipelineConfig::default();
        let filter = SanctionFilter::StartedAfter(config.cutoff_start());
        let kept: Vec<_> = records()
            .into_iter()
            .filter(|r| filter.meets_criteria(r))
            .collect();
        assert_eq!(ids(&kept), vec!["a", "d"]);
    }

    #[test]
    fn test_dashboard_chain() {
        let chain = FilterChain::for_config(&PipelineConfig::default());
        assert_eq!(chain.stages().len(), 3);

        let kept = chain.apply(records());
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn test_chain_matches_combined_filter() {
        let chain = FilterChain::for_config(&PipelineConfig::default());
        let combined = chain.combined();
        let expected: Vec<_> = records()
            .into_iter()
            .filter(|r| combined.meets_criteria(r))
            .collect();
        assert_eq!(chain.apply(records()), expected);
    }

    #[test]
    fn test_any_filter() {
        let filter = SanctionFilter::Any(vec![
            SanctionFilter::Country("ua".to_string()),
            SanctionFilter::StartedBefore(
                NaiveDate::from_ymd_opt(2011, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            ),
        ]);
        let kept: Vec<_> = records()
            .into_iter()
            .filter(|r| filter.meets_criteria(r))
            .collect();
        assert_eq!(ids(&kept), vec!["b", "c"]);
    }
}
