//! Domain models for the sanctions pipeline
//!
//! A `SanctionRecord` is one row of the sanction × sanctioned-entity join.
//! Normalization wraps it into an `EnrichedRecord` carrying the derived
//! validity window and origin.

pub mod record;

pub use record::{EnrichedRecord, SanctionRecord, Validity};
