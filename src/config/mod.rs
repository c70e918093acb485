//! Configuration for a pipeline run.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{PipelineError, Result};

/// Environment variable holding the entity store connection string
pub const DATABASE_URI_ENV: &str = "FTM_STORE_URI";

/// How to render the icon of a schema without a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconFallback {
    /// Use the generic fallback icon
    #[default]
    Fallback,
    /// Leave the icon cell empty
    Omit,
}

/// Where the region flag in front of an authority comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorityStyle {
    /// Only the authority lookup table
    #[default]
    Lookup,
    /// The record's origin first, then the authority table, then a generic
    /// region icon for supranational bodies
    OriginFirst,
}

/// Presentation options for the daily pivot tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PivotStyle {
    /// Render missing cells as empty strings instead of `0`
    pub fill_blank: bool,
    /// Most recent date first
    pub newest_first: bool,
    /// Insert a row holding each column's display icon above the data
    pub icon_header: bool,
}

/// Output artifact locations
#[derive(Debug, Clone)]
pub struct OutputPaths {
    /// Directory all artifacts are written into
    pub dir: PathBuf,
    /// Detail table
    pub table: String,
    /// Monthly counts
    pub timeline: String,
    /// Daily counts per entity type, German labels
    pub recent_schema: String,
    /// Daily counts per entity type, English labels
    pub recent_schema_en: String,
    /// Daily counts per origin
    pub recent_origin: String,
    /// Summary counts and update timestamp
    pub meta: String,
}

impl OutputPaths {
    /// Output paths rooted at `dir` with the default file names
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn table_path(&self) -> PathBuf {
        self.dir.join(&self.table)
    }

    #[must_use]
    pub fn timeline_path(&self) -> PathBuf {
        self.dir.join(&self.timeline)
    }

    #[must_use]
    pub fn recent_schema_path(&self) -> PathBuf {
        self.dir.join(&self.recent_schema)
    }

    #[must_use]
    pub fn recent_schema_en_path(&self) -> PathBuf {
        self.dir.join(&self.recent_schema_en)
    }

    #[must_use]
    pub fn recent_origin_path(&self) -> PathBuf {
        self.dir.join(&self.recent_origin)
    }

    #[must_use]
    pub fn meta_path(&self) -> PathBuf {
        self.dir.join(&self.meta)
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./src/data"),
            table: "sanctions_2014-2022.csv".to_string(),
            timeline: "sanctions_timeline_2014-2022.csv".to_string(),
            recent_schema: "recent_schema_aggregation.csv".to_string(),
            recent_schema_en: "recent_schema_aggregation_en.csv".to_string(),
            recent_origin: "recent_origin_aggregation.csv".to_string(),
            meta: "meta.json".to_string(),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Connection string for the entity store
    pub database_url: Option<String>,
    /// Country code the sanctioned entities must be associated with
    pub target_country: String,
    /// Records must start after January 1 of this year
    pub cutoff_year: i32,
    /// First day of the recent window
    pub recent_cutoff: NaiveDate,
    /// Link label for source URLs
    pub source_label: String,
    /// Icon behavior for unknown schemas
    pub icon_fallback: IconFallback,
    /// Authority annotation behavior
    pub authority_style: AuthorityStyle,
    /// Pivot table presentation
    pub pivot_style: PivotStyle,
    /// Where artifacts are written
    pub outputs: OutputPaths,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            target_country: "ru".to_string(),
            cutoff_year: 2014,
            recent_cutoff: NaiveDate::from_ymd_opt(2022, 2, 22).unwrap_or_default(),
            source_label: "Quelle".to_string(),
            icon_fallback: IconFallback::default(),
            authority_style: AuthorityStyle::default(),
            pivot_style: PivotStyle::default(),
            outputs: OutputPaths::default(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration with the connection string taken from
    /// `FTM_STORE_URI`
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var(DATABASE_URI_ENV)
            .map_err(|_| PipelineError::config(format!("{DATABASE_URI_ENV} is not set")))?;
        Ok(Self::default().with_database_url(database_url))
    }

    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_outputs(mut self, outputs: OutputPaths) -> Self {
        self.outputs = outputs;
        self
    }

    /// Connection string, or a configuration error when unset
    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| PipelineError::config("no database connection string configured"))
    }

    /// Start of the cutoff year at midnight
    #[must_use]
    pub fn cutoff_start(&self) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(self.cutoff_year, 1, 1)
            .unwrap_or_default()
            .and_time(chrono::NaiveTime::MIN)
    }

    /// First instant of the recent window
    #[must_use]
    pub fn recent_start(&self) -> chrono::NaiveDateTime {
        self.recent_cutoff.and_time(chrono::NaiveTime::MIN)
    }
}
