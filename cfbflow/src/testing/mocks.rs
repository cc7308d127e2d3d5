//! Scripted unit runner for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::UnitOutput;
use crate::errors::RunnerError;
use crate::runner::{UnitEnvironment, UnitRunner};
use crate::stages::UnitRef;

/// What a scripted unit does when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Succeed with no output.
    Succeed,
    /// Exit non-zero with the given stderr.
    Fail(String),
    /// Fail resolution: the unit does not exist.
    Missing,
    /// Exceed the time budget.
    TimeOut,
    /// Fail inside the runner itself.
    Unexpected(String),
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The unit that was run.
    pub unit: UnitRef,
    /// The environment it received.
    pub env: UnitEnvironment,
}

/// A deterministic runner whose units succeed unless scripted otherwise.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    outcomes: HashMap<String, ScriptedOutcome>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    /// Creates a runner where every unit succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts an outcome for a unit.
    #[must_use]
    pub fn with_outcome(mut self, unit: impl Into<String>, outcome: ScriptedOutcome) -> Self {
        self.outcomes.insert(unit.into(), outcome);
        self
    }

    /// Makes a unit exit with failure.
    #[must_use]
    pub fn fail(self, unit: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.with_outcome(unit, ScriptedOutcome::Fail(stderr.into()))
    }

    /// Makes a unit unresolvable.
    #[must_use]
    pub fn missing(self, unit: impl Into<String>) -> Self {
        self.with_outcome(unit, ScriptedOutcome::Missing)
    }

    /// Makes a unit time out.
    #[must_use]
    pub fn time_out(self, unit: impl Into<String>) -> Self {
        self.with_outcome(unit, ScriptedOutcome::TimeOut)
    }

    /// Returns every recorded invocation in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the invoked unit references in order.
    #[must_use]
    pub fn invoked_units(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|c| c.unit.as_str().to_string())
            .collect()
    }

    /// Returns how many times a unit was invoked.
    #[must_use]
    pub fn call_count_for(&self, unit: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.unit.as_str() == unit)
            .count()
    }

    /// Clears recorded calls.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn outcome(&self, unit: &UnitRef) -> ScriptedOutcome {
        self.outcomes
            .get(unit.as_str())
            .cloned()
            .unwrap_or(ScriptedOutcome::Succeed)
    }
}

#[async_trait]
impl UnitRunner for ScriptedRunner {
    fn resolve(&self, unit: &UnitRef) -> Result<(), RunnerError> {
        match self.outcome(unit) {
            ScriptedOutcome::Missing => Err(RunnerError::not_found(unit.as_str(), unit.as_str())),
            _ => Ok(()),
        }
    }

    async fn run_unit(
        &self,
        unit: &UnitRef,
        env: &UnitEnvironment,
    ) -> Result<UnitOutput, RunnerError> {
        self.calls.lock().push(RecordedCall {
            unit: unit.clone(),
            env: *env,
        });

        match self.outcome(unit) {
            ScriptedOutcome::Succeed => Ok(UnitOutput::captured(format!("ran {unit}"), "")),
            ScriptedOutcome::Fail(stderr) => Err(RunnerError::execution_failed(
                unit.as_str(),
                Some(1),
                "",
                stderr,
            )),
            ScriptedOutcome::Missing => Err(RunnerError::not_found(unit.as_str(), unit.as_str())),
            ScriptedOutcome::TimeOut => {
                Err(RunnerError::timed_out(unit.as_str(), Duration::from_secs(1)))
            }
            ScriptedOutcome::Unexpected(message) => {
                Err(RunnerError::unexpected(unit.as_str(), message))
            }
        }
    }
}
