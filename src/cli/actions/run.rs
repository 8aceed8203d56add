use super::Action;
use crate::{
    dsn, probe,
    report::{Format, ProbeReport},
};
use chrono::{SecondsFormat, Utc};

/// Execute the action's business logic: probe each target in order and print
/// the rendered outcome. A failed probe never aborts the run; the remaining
/// targets are still probed.
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Probe { requests, format } => {
            if matches!(format, Format::Text | Format::Ansi) {
                println!(
                    "{} - probing {} targets",
                    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                    requests.len()
                );
            }

            for request in requests {
                let started = Utc::now();
                let spec = dsn::parse(&request.dsn);
                let outcome = probe::run(&spec, &request.query).await;
                let report = ProbeReport::new(request.label, outcome, started);
                println!("{}", format.render(&report));
            }

            Ok(())
        }
    }
}
