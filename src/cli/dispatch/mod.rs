use crate::{cli::actions::Action, probe::ProbeRequest, report::Format};
use anyhow::{Context, Result, ensure};
use clap::ArgMatches;

/// Convert `ArgMatches` into typed Action enum with validation
///
/// Both connection strings must be present and non-empty before any probe
/// runs; everything after this point is per-probe and non-fatal.
///
/// # Errors
///
/// Returns an error if a connection string is missing or empty, or the
/// output format is unknown
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let conn_a = matches
        .get_one::<String>("conn-a")
        .context("DB_CONN_A is required")?;
    let conn_b = matches
        .get_one::<String>("conn-b")
        .context("DB_CONN_B is required")?;
    ensure!(!conn_a.is_empty(), "DB_CONN_A must not be empty");
    ensure!(!conn_b.is_empty(), "DB_CONN_B must not be empty");

    let query = matches
        .get_one::<String>("query")
        .map_or("SELECT * FROM test LIMIT 1", String::as_str)
        .to_string();

    let format = matches
        .get_one::<String>("format")
        .map_or("text", String::as_str)
        .parse::<Format>()?;

    let requests = vec![
        ProbeRequest {
            label: "Database A".to_string(),
            dsn: conn_a.clone(),
            query: query.clone(),
        },
        ProbeRequest {
            label: "Database B".to_string(),
            dsn: conn_b.clone(),
            query,
        },
    ];

    Ok(Action::Probe { requests, format })
}
