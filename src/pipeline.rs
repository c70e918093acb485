//! End-to-end pipeline
//!
//! `process` runs the pure part (normalize, filter, build tables and
//! aggregations) over an in-memory record set; `write_artifacts` writes the
//! results; `run` adds the database load in front.

use std::time::Instant;

use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;

use crate::aggregate::{
    self, MetaSummary, MonthlyCount, PivotTable, monthly_timeline, origin_pivot, pivot_batch,
    schema_pivot, summarize, timeline_batch,
};
use crate::config::{OutputPaths, PipelineConfig, PivotStyle};
use crate::error::Result;
use crate::filter::FilterChain;
use crate::loader::load_records;
use crate::lookup::Language;
use crate::models::{EnrichedRecord, SanctionRecord};
use crate::normalize::Normalizer;
use crate::table::{DetailRow, TableBuilder};
use crate::utils::io::{ensure_directory, write_csv, write_json};
use crate::utils::logging::log_stage_count;

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// Records that passed the filter chain
    pub records: Vec<EnrichedRecord>,
    /// Deduplicated detail rows
    pub table: Vec<DetailRow>,
    pub timeline: Vec<MonthlyCount>,
    /// Recent-window daily counts per entity type, German labels
    pub recent_schema: PivotTable,
    /// Recent-window daily counts per entity type, English labels
    pub recent_schema_en: PivotTable,
    /// Recent-window daily counts per origin
    pub recent_origin: PivotTable,
    pub meta: MetaSummary,
    /// Presentation applied when the pivots are written
    pub pivot_style: PivotStyle,
}

/// Normalize, filter and aggregate `records` as of `now`
#[must_use]
pub fn process(
    records: Vec<SanctionRecord>,
    config: &PipelineConfig,
    now: NaiveDateTime,
) -> Artifacts {
    let normalizer = Normalizer::new(now);
    let records = normalizer.enrich_all(records);
    log_stage_count("Total entries", records.len());

    let records = FilterChain::for_config(config).apply(records);

    let table = TableBuilder::new(config).build(&records);
    let timeline = monthly_timeline(&records);

    let recent = aggregate::recent_records(&records, config.recent_start());
    log_stage_count(
        &format!("Entries since {}", config.recent_cutoff),
        recent.len(),
    );
    let recent_schema = schema_pivot(recent.iter().copied(), Language::De);
    let recent_schema_en = schema_pivot(recent.iter().copied(), Language::En);
    let recent_origin = origin_pivot(recent.iter().copied());

    let meta = summarize(&records, config.recent_start(), now);

    Artifacts {
        records,
        table,
        timeline,
        recent_schema,
        recent_schema_en,
        recent_origin,
        meta,
        pivot_style: config.pivot_style,
    }
}

impl Artifacts {
    /// Detail table as a record batch
    pub fn table_batch(&self) -> Result<RecordBatch> {
        crate::table::to_record_batch(&self.table)
    }

    /// Monthly timeline as a record batch
    pub fn timeline_batch(&self) -> Result<RecordBatch> {
        timeline_batch(&self.timeline)
    }
}

/// Write every artifact, replacing existing files
pub fn write_artifacts(artifacts: &Artifacts, outputs: &OutputPaths) -> Result<()> {
    ensure_directory(&outputs.dir)?;

    write_csv(&outputs.table_path(), &artifacts.table_batch()?)?;
    write_csv(&outputs.timeline_path(), &artifacts.timeline_batch()?)?;

    let style = artifacts.pivot_style;
    write_csv(
        &outputs.recent_schema_path(),
        &pivot_batch(&artifacts.recent_schema, style)?,
    )?;
    write_csv(
        &outputs.recent_schema_en_path(),
        &pivot_batch(&artifacts.recent_schema_en, style)?,
    )?;
    write_csv(
        &outputs.recent_origin_path(),
        &pivot_batch(&artifacts.recent_origin, style)?,
    )?;

    write_json(&outputs.meta_path(), &artifacts.meta)
}

/// Load, process and write in one go
///
/// `now` is taken once at the start of the run.
pub async fn run(config: &PipelineConfig) -> Result<Artifacts> {
    let started = Instant::now();
    let now = Normalizer::at_current_time().now();

    let records = load_records(config.database_url()?).await?;
    let artifacts = process(records, config, now);
    write_artifacts(&artifacts, &config.outputs)?;

    log::info!("Pipeline finished in {:?}", started.elapsed());
    Ok(artifacts)
}
