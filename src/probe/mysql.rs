use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use sqlx::{
    Column, ConnectOptions, Connection, Row, TypeInfo,
    mysql::{MySqlConnectOptions, MySqlRow},
};

use super::{ProbeOutcome, ProbeRow};
use crate::dsn::ConnectionSpec;

const DEFAULT_PORT: u16 = 3306;

/// Probe a MySQL/MariaDB target: connect, execute the query once, fetch at
/// most one row.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or the query
/// fails; the caller converts it into a [`ProbeOutcome::Failed`].
pub(super) async fn probe(spec: &ConnectionSpec, query: &str) -> Result<ProbeOutcome> {
    let mut options = MySqlConnectOptions::new();

    if let Some(host) = spec.param("host") {
        options = options.host(host);
    }
    options = options.port(
        spec.param("port")
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT),
    );
    if let Some(dbname) = spec.param("dbname") {
        options = options.database(dbname);
    }
    if let Some(user) = &spec.user {
        options = options.username(user);
    }
    if let Some(password) = &spec.password {
        options = options.password(password);
    }

    let mut conn = options.connect().await.context("connection failed")?;

    let fetched = sqlx::query(query).fetch_optional(&mut conn).await;

    // release the handle before inspecting the result so it is closed on the
    // query-error path as well
    let _ = conn.close().await;

    let row = fetched.context("query failed")?;

    Ok(row.map_or(ProbeOutcome::ConnectedEmpty, |row| {
        ProbeOutcome::Connected {
            field_count: row.len(),
            row: decode_row(&row),
        }
    }))
}

fn decode_row(row: &MySqlRow) -> ProbeRow {
    row.columns()
        .iter()
        .map(|column| {
            (
                column.name().to_string(),
                decode_value(row, column.ordinal(), column.type_info().name()),
            )
        })
        .collect()
}

/// Decode one column into a JSON value by declared type, falling back to text
/// and finally to null for types the probe has no decoder for.
fn decode_value(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    match type_name {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<Option<u64>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::from(f64::from(v))),
        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
        "DATETIME" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        "TIMESTAMP" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_rfc3339())),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |bytes| {
                Value::String(format!("<{} bytes>", bytes.len()))
            }),
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::String),
    }
}
