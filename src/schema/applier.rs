use super::clickhouse::{ClickhouseClient, QueryResponse};
use super::loader::{SqlScript, load_scripts};
use crate::error::ProvisionError;
use reqwest::StatusCode;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

const ALREADY_EXISTS: &str = "already exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Success,
    /// Non-200 whose body says the object already exists.
    SkippedExists,
    /// Any other non-200; carries the raw response body.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub file_name: String,
    pub outcome: ScriptOutcome,
}

impl fmt::Display for ScriptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ScriptOutcome::Success => write!(f, "Successfully executed {}", self.file_name),
            ScriptOutcome::SkippedExists => {
                write!(f, "Skipping {} as it already exists", self.file_name)
            }
            ScriptOutcome::Failed(body) => {
                write!(f, "Error executing {}: {}", self.file_name, body)
            }
        }
    }
}

/// Outcomes of one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub scripts: Vec<ScriptReport>,
}

impl ApplyReport {
    pub fn total(&self) -> usize {
        self.scripts.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, ScriptOutcome::Success))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ScriptOutcome::SkippedExists))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ScriptOutcome::Failed(_)))
    }

    pub fn outcome_of(&self, file_name: &str) -> Option<&ScriptOutcome> {
        self.scripts
            .iter()
            .find(|r| r.file_name == file_name)
            .map(|r| &r.outcome)
    }

    /// Exit decision for a finished run. Failed scripts are only fatal when
    /// `fail_on_error` is set; every script has already been attempted.
    pub fn check(&self, fail_on_error: bool) -> Result<(), ProvisionError> {
        let failed = self.failed();
        if failed == 0 {
            return Ok(());
        }
        if fail_on_error {
            return Err(ProvisionError::PartialFailure {
                failed,
                total: self.total(),
            });
        }
        warn!(failed, "some scripts failed; exiting 0");
        Ok(())
    }

    fn count(&self, pred: impl Fn(&ScriptOutcome) -> bool) -> usize {
        self.scripts.iter().filter(|r| pred(&r.outcome)).count()
    }
}

pub fn classify(resp: &QueryResponse) -> ScriptOutcome {
    if resp.status == StatusCode::OK {
        ScriptOutcome::Success
    } else if resp.body.contains(ALREADY_EXISTS) {
        ScriptOutcome::SkippedExists
    } else {
        ScriptOutcome::Failed(resp.body.clone())
    }
}

/// Execute each script once, independently. A rejected script does not stop
/// the run; a transport error does.
///
/// `observer` sees each report as soon as its script has been classified.
pub async fn apply_scripts<F>(
    client: &ClickhouseClient,
    scripts: &[SqlScript],
    mut observer: F,
) -> Result<ApplyReport, ProvisionError>
where
    F: FnMut(&ScriptReport),
{
    let mut report = ApplyReport::default();
    for script in scripts {
        let resp = client.execute(&script.contents).await?;
        let outcome = classify(&resp);
        match &outcome {
            ScriptOutcome::Success => info!(file = %script.file_name, "script applied"),
            ScriptOutcome::SkippedExists => {
                info!(file = %script.file_name, "script target already exists")
            }
            ScriptOutcome::Failed(_) => {
                warn!(file = %script.file_name, status = %resp.status, "script rejected")
            }
        }
        let entry = ScriptReport {
            file_name: script.file_name.clone(),
            outcome,
        };
        observer(&entry);
        report.scripts.push(entry);
    }
    Ok(report)
}

pub async fn apply_dir<F>(
    client: &ClickhouseClient,
    dir: &Path,
    observer: F,
) -> Result<ApplyReport, ProvisionError>
where
    F: FnMut(&ScriptReport),
{
    let scripts = load_scripts(dir)?;
    info!(path = %dir.display(), count = scripts.len(), "applying sql scripts");
    apply_scripts(client, &scripts, observer).await
}
