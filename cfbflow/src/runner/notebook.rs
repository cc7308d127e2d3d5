//! Runs notebooks as child processes.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{NotebookRunnerConfig, UnitEnvironment, UnitRunner};
use crate::core::UnitOutput;
use crate::errors::RunnerError;
use crate::stages::UnitRef;

/// Executes each unit with `<interpreter> <launcher args> <unit>`.
///
/// The child runs in the configured source directory with both output
/// streams captured in full. Hints from the [`UnitEnvironment`] become child
/// environment variables; the parent environment is never modified.
#[derive(Debug, Clone, Default)]
pub struct NotebookRunner {
    config: NotebookRunnerConfig,
}

impl NotebookRunner {
    /// Creates a runner with the given configuration.
    #[must_use]
    pub fn new(config: NotebookRunnerConfig) -> Self {
        Self { config }
    }

    /// Returns the runner configuration.
    #[must_use]
    pub fn config(&self) -> &NotebookRunnerConfig {
        &self.config
    }

    fn command(&self, unit: &UnitRef, env: &UnitEnvironment) -> Command {
        let mut cmd = Command::new(&self.config.interpreter);
        cmd.args(&self.config.launcher_args)
            .arg(unit.as_str())
            .current_dir(&self.config.source_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        for name in env.absent_vars() {
            cmd.env_remove(name);
        }
        for (name, value) in env.env_vars() {
            cmd.env(name, value);
        }
        cmd
    }
}

#[async_trait]
impl UnitRunner for NotebookRunner {
    fn resolve(&self, unit: &UnitRef) -> Result<(), RunnerError> {
        let path = unit.resolve_in(&self.config.source_dir);
        if path.exists() {
            Ok(())
        } else {
            Err(RunnerError::not_found(unit.as_str(), path))
        }
    }

    async fn run_unit(
        &self,
        unit: &UnitRef,
        env: &UnitEnvironment,
    ) -> Result<UnitOutput, RunnerError> {
        let started = Instant::now();
        let child = self
            .command(unit, env)
            .spawn()
            .map_err(|e| RunnerError::unexpected(unit.as_str(), e.to_string()))?;

        debug!(unit = %unit, pid = ?child.id(), "Notebook process spawned");

        // Dropping the future on timeout drops the child, which kills it.
        let waited = child.wait_with_output();
        let output = match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, waited).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(unit = %unit, timeout_s = limit.as_secs_f64(), "Notebook timed out");
                    return Err(RunnerError::timed_out(unit.as_str(), limit));
                }
            },
            None => waited.await,
        }
        .map_err(|e| RunnerError::unexpected(unit.as_str(), e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(UnitOutput::captured(stdout, stderr).with_duration(started.elapsed()))
        } else {
            Err(RunnerError::execution_failed(
                unit.as_str(),
                output.status.code(),
                stdout,
                stderr,
            ))
        }
    }
}
