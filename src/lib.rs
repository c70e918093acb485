//! Batch pipeline that turns sanctions records from an FtM entity store into
//! the static CSV and JSON artifacts behind the sanctions dashboard.
//!
//! Stages: load → normalize → filter → build tables and aggregations → write.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod table;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{OutputPaths, PipelineConfig};
pub use error::{PipelineError, Result};
pub use models::{EnrichedRecord, SanctionRecord, Validity};
pub use normalize::Normalizer;
pub use pipeline::{Artifacts, process, run, write_artifacts};
