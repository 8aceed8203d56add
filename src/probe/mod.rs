//! Connect, run one query, fetch at most one row, report what happened.
//!
//! Each probe gets an independently parsed [`ConnectionSpec`] and a connection
//! handle scoped to the call; the handle is released on every exit path.

pub mod mysql;
pub mod postgres;

use crate::dsn::ConnectionSpec;
use serde::{Deserialize, Serialize};

/// Ordered column name/value pairs of a fetched row.
pub type ProbeRow = Vec<(String, serde_json::Value)>;

/// Outcome of a single connect-query-report cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Query returned a row.
    Connected { row: ProbeRow, field_count: usize },
    /// Connection succeeded, query returned zero rows.
    ConnectedEmpty,
    /// Connection or query failed; `message` carries the full error chain.
    Failed { message: String },
}

/// One probe target as supplied by the caller. `label` is display-only
/// metadata passed through for traceability.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub label: String,
    pub dsn: String,
    pub query: String,
}

/// Run one probe against the database described by `spec`.
///
/// The query is executed verbatim, once, with no parameters. Errors never
/// propagate past this boundary; connection and query failures alike come
/// back as [`ProbeOutcome::Failed`], so a broken target cannot take down the
/// run for the remaining ones.
pub async fn run(spec: &ConnectionSpec, query: &str) -> ProbeOutcome {
    let result = match spec.driver() {
        Some("pgsql" | "postgres" | "postgresql") => postgres::probe(spec, query).await,
        Some("mysql" | "mariadb") => mysql::probe(spec, query).await,
        Some(other) => {
            return ProbeOutcome::Failed {
                message: format!("unsupported driver: {other}"),
            };
        }
        None => {
            return ProbeOutcome::Failed {
                message: "missing driver prefix in connection string".to_string(),
            };
        }
    };

    result.unwrap_or_else(|err| ProbeOutcome::Failed {
        message: format!("{err:#}"),
    })
}
