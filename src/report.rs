//! Rendering of probe outcomes. The original tool shipped plain-text, HTML
//! and ANSI-terminal renditions of the same routine; they live here as
//! [`Format`] variants so the probe core never carries display formatting,
//! with a JSON line format on top.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::probe::ProbeOutcome;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Output format for a probe report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Ansi,
    Html,
    Json,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "ansi" => Ok(Self::Ansi),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!("unsupported format: {other}")),
        }
    }
}

/// One probe outcome plus the envelope the renderers need: display label,
/// RFC 3339 start time and elapsed milliseconds.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub label: String,
    pub time: String,
    pub runtime_ms: i64,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    #[must_use]
    pub fn new(label: impl Into<String>, outcome: ProbeOutcome, started: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            time: started.to_rfc3339_opts(SecondsFormat::Secs, true),
            runtime_ms: Utc::now().signed_duration_since(started).num_milliseconds(),
            outcome,
        }
    }
}

impl Format {
    /// Render a probe report in this format.
    #[must_use]
    pub fn render(self, report: &ProbeReport) -> String {
        match self {
            Self::Text => text(report),
            Self::Ansi => ansi(report),
            Self::Html => html(report),
            Self::Json => json(report),
        }
    }
}

fn text(report: &ProbeReport) -> String {
    let mut out = format!("--- {} ---\n", report.label);
    match &report.outcome {
        ProbeOutcome::Connected { row, field_count } => {
            out.push_str(&format!(
                "connected, first row ({field_count} fields):\n"
            ));
            for (column, value) in row {
                out.push_str(&format!("  {column}: {}\n", display_value(value)));
            }
        }
        ProbeOutcome::ConnectedEmpty => {
            out.push_str("connected, query returned no rows\n");
        }
        ProbeOutcome::Failed { message } => {
            out.push_str(&format!("probe failed: {message}\n"));
        }
    }
    out
}

fn ansi(report: &ProbeReport) -> String {
    let mut out = format!("{BOLD}--- {} ---{RESET}\n", report.label);
    match &report.outcome {
        ProbeOutcome::Connected { row, field_count } => {
            out.push_str(&format!(
                "{GREEN}connected{RESET}, first row ({field_count} fields):\n"
            ));
            for (column, value) in row {
                out.push_str(&format!(
                    "  {BOLD}{column}{RESET}: {}\n",
                    display_value(value)
                ));
            }
        }
        ProbeOutcome::ConnectedEmpty => {
            out.push_str(&format!("{YELLOW}connected, query returned no rows{RESET}\n"));
        }
        ProbeOutcome::Failed { message } => {
            // terminal rendition keeps only the first line of driver errors;
            // the outcome itself retains the full message
            let first_line = message.lines().next().unwrap_or_default();
            out.push_str(&format!("{RED}probe failed: {first_line}{RESET}\n"));
        }
    }
    out
}

fn html(report: &ProbeReport) -> String {
    let label = escape(&report.label);
    match &report.outcome {
        ProbeOutcome::Connected { row, field_count } => {
            let mut out = format!(
                "<h3>{label}</h3>\n<p>connected, first row ({field_count} fields)</p>\n<table>\n"
            );
            for (column, value) in row {
                out.push_str(&format!(
                    "<tr><th>{}</th><td>{}</td></tr>\n",
                    escape(column),
                    escape(&display_value(value))
                ));
            }
            out.push_str("</table>");
            out
        }
        ProbeOutcome::ConnectedEmpty => {
            format!("<h3>{label}</h3>\n<p>connected, query returned no rows</p>")
        }
        ProbeOutcome::Failed { message } => {
            format!("<h3>{label}</h3>\n<p>probe failed: {}</p>", escape(message))
        }
    }
}

fn json(report: &ProbeReport) -> String {
    serde_json::to_string(report).unwrap_or_default()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn connected_report() -> ProbeReport {
        ProbeReport {
            label: "Database A".to_string(),
            time: "2024-01-01T00:00:00Z".to_string(),
            runtime_ms: 12,
            outcome: ProbeOutcome::Connected {
                row: vec![
                    ("id".to_string(), json!(1)),
                    ("name".to_string(), json!("first")),
                    ("deleted_at".to_string(), Value::Null),
                ],
                field_count: 3,
            },
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<Format>().unwrap(), Format::Text);
        assert_eq!("ansi".parse::<Format>().unwrap(), Format::Ansi);
        assert_eq!("html".parse::<Format>().unwrap(), Format::Html);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_text_connected() {
        let out = Format::Text.render(&connected_report());
        assert!(out.starts_with("--- Database A ---\n"));
        assert!(out.contains("first row (3 fields)"));
        assert!(out.contains("  id: 1\n"));
        assert!(out.contains("  name: first\n"));
        assert!(out.contains("  deleted_at: NULL\n"));
    }

    #[test]
    fn test_text_empty() {
        let report = ProbeReport {
            outcome: ProbeOutcome::ConnectedEmpty,
            ..connected_report()
        };
        let out = Format::Text.render(&report);
        assert!(out.contains("query returned no rows"));
    }

    #[test]
    fn test_text_failed_keeps_all_lines() {
        let report = ProbeReport {
            outcome: ProbeOutcome::Failed {
                message: "connection failed: no route to host\ndetail line".to_string(),
            },
            ..connected_report()
        };
        let out = Format::Text.render(&report);
        assert!(out.contains("no route to host"));
        assert!(out.contains("detail line"));
    }

    #[test]
    fn test_ansi_truncates_failure_at_first_newline() {
        let report = ProbeReport {
            outcome: ProbeOutcome::Failed {
                message: "connection failed: refused\nsecond line with detail".to_string(),
            },
            ..connected_report()
        };
        let out = Format::Ansi.render(&report);
        assert!(out.contains("connection failed: refused"));
        assert!(!out.contains("second line with detail"));
        assert!(out.contains(RED));
        assert!(out.contains(RESET));
    }

    #[test]
    fn test_ansi_connected_is_colored() {
        let out = Format::Ansi.render(&connected_report());
        assert!(out.contains(GREEN));
        assert!(out.contains(BOLD));
    }

    #[test]
    fn test_html_escapes_values() {
        let report = ProbeReport {
            label: "A <&> B".to_string(),
            time: "2024-01-01T00:00:00Z".to_string(),
            runtime_ms: 3,
            outcome: ProbeOutcome::Connected {
                row: vec![("note".to_string(), json!("<script>\"x\"&'y'</script>"))],
                field_count: 1,
            },
        };
        let out = Format::Html.render(&report);
        assert!(out.contains("<h3>A &lt;&amp;&gt; B</h3>"));
        assert!(out.contains("&lt;script&gt;&quot;x&quot;&amp;"));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn test_html_failed_escapes_message() {
        let report = ProbeReport {
            outcome: ProbeOutcome::Failed {
                message: "bad host <none>".to_string(),
            },
            ..connected_report()
        };
        let out = Format::Html.render(&report);
        assert!(out.contains("probe failed: bad host &lt;none&gt;"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = connected_report();
        let out = Format::Json.render(&report);
        assert!(out.contains("\"status\":\"connected\""));
        assert!(out.contains("\"label\":\"Database A\""));
        assert!(out.contains("\"runtime_ms\":12"));

        let parsed: ProbeReport = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_failed() {
        let report = ProbeReport {
            outcome: ProbeOutcome::Failed {
                message: "boom".to_string(),
            },
            ..connected_report()
        };
        let out = Format::Json.render(&report);
        assert!(out.contains("\"status\":\"failed\""));
        assert!(out.contains("\"message\":\"boom\""));
    }

    #[test]
    fn test_report_new_stamps_time() {
        let started = Utc::now();
        let report = ProbeReport::new("Database B", ProbeOutcome::ConnectedEmpty, started);
        assert_eq!(report.label, "Database B");
        assert!(report.runtime_ms >= 0);
        assert_eq!(
            report.time,
            started.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    #[test]
    fn test_display_value_variants() {
        assert_eq!(display_value(&Value::Null), "NULL");
        assert_eq!(display_value(&json!("plain")), "plain");
        assert_eq!(display_value(&json!(3.5)), "3.5");
        assert_eq!(display_value(&json!(true)), "true");
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape("no markup here"), "no markup here");
    }
}
