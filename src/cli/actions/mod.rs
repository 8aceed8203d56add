mod run;

use crate::{probe::ProbeRequest, report::Format};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Probe {
        requests: Vec<ProbeRequest>,
        format: Format,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
