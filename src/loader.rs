//! Entity store loading
//!
//! Runs the sanction × sanctioned-entity join against the Postgres-backed
//! FtM store and converts each row into a `SanctionRecord`. Any connection
//! or query failure is returned as-is; there are no retries.

use std::time::Instant;

use futures::TryStreamExt;
use serde_json::Value;
use sqlx::{Connection, PgConnection};

use crate::error::Result;
use crate::models::SanctionRecord;
use crate::utils::logging::{create_spinner, finish_and_clear};

/// Join of every `Sanction` entity with the entity it refers to
pub const SANCTIONS_QUERY: &str = r#"
    select
        s.id as sanction_id,
        e.id as entity_id,
        s.entity ->> 'caption' as caption,
        s.entity -> 'properties' -> 'program' as program,
        s.entity -> 'properties' -> 'reason' as reason,
        s.entity -> 'properties' -> 'country' as origin,
        s.entity -> 'properties' -> 'authority' as authority,
        s.entity -> 'properties' -> 'sourceUrl' as source_url,
        s.entity -> 'properties' -> 'startDate' as start_date,
        s.entity -> 'properties' -> 'endDate' as end_date,
        s.entity -> 'properties' -> 'date' as date,
        e.entity ->> 'schema' as schema,
        e.entity -> 'properties' -> 'name' as name,
        e.entity -> 'properties' -> 'country' as countries
    from ftm_opensanctions s
    join ftm_opensanctions e on
        s.entity @> '{"schema": "Sanction"}' and
        s.entity -> 'properties' -> 'entity' ->> 0 = e.id
"#;

/// Raw join row as returned by the store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SanctionRow {
    pub sanction_id: String,
    pub entity_id: String,
    pub caption: Option<String>,
    pub program: Option<Value>,
    pub reason: Option<Value>,
    pub origin: Option<Value>,
    pub authority: Option<Value>,
    pub source_url: Option<Value>,
    pub start_date: Option<Value>,
    pub end_date: Option<Value>,
    pub date: Option<Value>,
    pub schema: Option<String>,
    pub name: Option<Value>,
    pub countries: Option<Value>,
}

/// Flatten a JSON property value into its string values
///
/// Arrays yield their elements, a bare string yields itself, `null` yields
/// nothing. Non-string scalars are kept in their JSON text form.
#[must_use]
pub fn property_values(value: Option<&Value>) -> Vec<String> {
    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar).collect(),
        Some(other) => scalar(other).into_iter().collect(),
    }
}

impl From<SanctionRow> for SanctionRecord {
    fn from(row: SanctionRow) -> Self {
        Self {
            sanction_id: row.sanction_id,
            entity_id: row.entity_id,
            caption: row.caption,
            schema: row.schema,
            name: property_values(row.name.as_ref()),
            program: property_values(row.program.as_ref()),
            reason: property_values(row.reason.as_ref()),
            origin: property_values(row.origin.as_ref()),
            authority: property_values(row.authority.as_ref()),
            source_url: property_values(row.source_url.as_ref()),
            start_date: property_values(row.start_date.as_ref()),
            end_date: property_values(row.end_date.as_ref()),
            date: property_values(row.date.as_ref()),
            countries: property_values(row.countries.as_ref()),
        }
    }
}

/// Load every sanction record from the store at `database_url`
pub async fn load_records(database_url: &str) -> Result<Vec<SanctionRecord>> {
    let start = Instant::now();
    let mut conn = PgConnection::connect(database_url).await?;
    log::debug!("Connected to entity store");

    let spinner = create_spinner(Some("Loading sanctions"));
    let mut records = Vec::new();
    {
        let mut rows = sqlx::query_as::<_, SanctionRow>(SANCTIONS_QUERY).fetch(&mut conn);
        while let Some(row) = rows.try_next().await? {
            records.push(SanctionRecord::from(row));
            spinner.inc(1);
        }
    }
    finish_and_clear(&spinner);

    conn.close().await?;
    log::info!(
        "Loaded {} sanction records in {:?}",
        records.len(),
        start.elapsed()
    );
    Ok(records)
}
