//! Stage and run status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The execution status of a single stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage has not started yet.
    Pending,
    /// Stage is currently running one of its units.
    Running,
    /// Every unit of the stage succeeded.
    Succeeded,
    /// One unit of the stage failed.
    Failed,
}

impl Default for StageStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl StageStatus {
    /// Returns true if the status represents a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Moves a pending stage to running.
    #[must_use]
    pub fn start(self) -> Self {
        match self {
            Self::Pending => Self::Running,
            other => other,
        }
    }

    /// Returns the status once the stage's units have stopped.
    #[must_use]
    pub fn finish(self, unit_failed: bool) -> Self {
        match self {
            Self::Running if unit_failed => Self::Failed,
            Self::Running => Self::Succeeded,
            other => other,
        }
    }
}

/// The lifecycle state of a whole run.
///
/// `NotStarted -> Running -> {Completed | Aborted}`. A run is aborted only
/// when one of its stages fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// No stage has been attempted.
    NotStarted,
    /// Stages are being executed.
    Running,
    /// The stage sequence was exhausted without a failure.
    Completed,
    /// A stage failed and the remaining stages were not attempted.
    Aborted,
}

impl Default for RunState {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

impl RunState {
    /// Returns true if the run has finished.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }

    /// Moves a run that has not started to running.
    #[must_use]
    pub fn start(self) -> Self {
        match self {
            Self::NotStarted => Self::Running,
            other => other,
        }
    }

    /// Returns the state after the stage sequence ends.
    #[must_use]
    pub fn finish(self, stage_failed: bool) -> Self {
        match self {
            Self::Running if stage_failed => Self::Aborted,
            Self::Running => Self::Completed,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_status_display() {
        assert_eq!(StageStatus::Pending.to_string(), "pending");
        assert_eq!(StageStatus::Succeeded.to_string(), "succeeded");
        assert_eq!(StageStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_stage_status_is_terminal() {
        assert_eq!(StageStatus::default(), StageStatus::Pending);
        assert!(StageStatus::Succeeded.is_terminal());
        assert!(StageStatus::Failed.is_terminal());
        assert!(!StageStatus::Running.is_terminal());
    }

    #[test]
    fn test_stage_status_lifecycle() {
        let running = StageStatus::default().start();
        assert_eq!(running, StageStatus::Running);
        assert_eq!(running.finish(false), StageStatus::Succeeded);
        assert_eq!(running.finish(true), StageStatus::Failed);
        assert_eq!(StageStatus::Pending.finish(true), StageStatus::Pending);
        assert_eq!(StageStatus::Failed.start(), StageStatus::Failed);
    }

    #[test]
    fn test_run_state_start() {
        assert_eq!(RunState::default().start(), RunState::Running);
        assert_eq!(RunState::Completed.start(), RunState::Completed);
    }

    #[test]
    fn test_run_state_finish() {
        assert_eq!(RunState::Running.finish(false), RunState::Completed);
        assert_eq!(RunState::Running.finish(true), RunState::Aborted);
        assert_eq!(RunState::NotStarted.finish(true), RunState::NotStarted);
        assert!(RunState::Aborted.is_terminal());
    }

    #[test]
    fn test_run_state_serialize() {
        let json = serde_json::to_string(&RunState::NotStarted).unwrap();
        assert_eq!(json, r#""not_started""#);

        let state: RunState = serde_json::from_str(r#""aborted""#).unwrap();
        assert_eq!(state, RunState::Aborted);
    }
}
