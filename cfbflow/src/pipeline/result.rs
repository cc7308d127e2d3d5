//! Run results, stage reports, and the final classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

use crate::core::{RunState, StageStatus};
use crate::errors::{FailureKind, RunnerError};
use crate::stages::{StageDefinition, UnitRef};

/// One-line classification of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunClassification {
    /// Every stage in the registry was selected and all succeeded.
    FullSuccess,
    /// A proper subset was selected and all selected stages succeeded.
    PartialSelectionSuccess,
    /// A stage failed; later stages were skipped.
    Incomplete {
        /// Stages that fully completed.
        completed: usize,
        /// Stages selected for the run.
        total: usize,
    },
}

impl RunClassification {
    /// Classifies a run from its counts and the size of the full registry.
    #[must_use]
    pub fn classify(total: usize, succeeded: usize, registry_len: usize) -> Self {
        if succeeded != total {
            Self::Incomplete {
                completed: succeeded,
                total,
            }
        } else if total == registry_len {
            Self::FullSuccess
        } else {
            Self::PartialSelectionSuccess
        }
    }

    /// Returns true for either success classification.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Incomplete { .. })
    }
}

impl fmt::Display for RunClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullSuccess => write!(f, "FULL PIPELINE COMPLETED SUCCESSFULLY"),
            Self::PartialSelectionSuccess => write!(f, "SELECTED STEPS COMPLETED SUCCESSFULLY"),
            Self::Incomplete { completed, total } => write!(
                f,
                "EXECUTION COMPLETED WITH ERRORS - {completed}/{total} steps completed"
            ),
        }
    }
}

/// Diagnostic for the unit that aborted a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFailure {
    /// Ordinal of the failing stage.
    pub ordinal: u32,
    /// Name of the failing stage.
    pub stage_name: String,
    /// The unit that failed.
    pub unit: UnitRef,
    /// What kind of failure it was.
    pub kind: FailureKind,
    /// Short error message.
    pub message: String,
    /// Captured output, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl UnitFailure {
    /// Builds a failure record from a runner error.
    #[must_use]
    pub fn from_error(stage: &StageDefinition, unit: &UnitRef, err: &RunnerError) -> Self {
        Self {
            ordinal: stage.ordinal,
            stage_name: stage.name.clone(),
            unit: unit.clone(),
            kind: err.kind(),
            message: err.to_string(),
            diagnostic: err.diagnostic_text(),
        }
    }

    /// Renders the multi-line diagnostic block shown to users.
    #[must_use]
    pub fn report(&self) -> String {
        let mut block = format!(
            "Error: Step {} ({}) {}: {}\n{}",
            self.ordinal, self.stage_name, self.kind, self.unit, self.message
        );
        if let Some(ref text) = self.diagnostic {
            block.push('\n');
            block.push_str(text);
        }
        block
    }
}

/// Outcome of one attempted stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    /// Stage ordinal.
    pub ordinal: u32,
    /// Stage name.
    pub name: String,
    /// Terminal status.
    pub status: StageStatus,
    /// Units that ran to completion, whether or not they succeeded.
    pub units_invoked: usize,
    /// Time spent in the stage.
    pub duration: Duration,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Unique id of this invocation.
    pub run_id: Uuid,
    /// Stages selected for this run.
    pub total_stages: usize,
    /// Stages whose units all succeeded.
    pub succeeded_stages: usize,
    /// Ordinal of the stage that aborted the run.
    pub failed_ordinal: Option<u32>,
    /// Monotonic elapsed time of the stage loop.
    pub duration: Duration,
    /// Wall-clock start.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end.
    pub finished_at: DateTime<Utc>,
    /// Final lifecycle state.
    pub state: RunState,
    /// Final classification.
    pub classification: RunClassification,
    /// Attempted stages in execution order.
    pub stages: Vec<StageReport>,
    /// Diagnostic for the aborting unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<UnitFailure>,
}

impl RunResult {
    /// Returns true when every selected stage succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.succeeded_stages == self.total_stages
    }

    /// Returns the classification line followed by the elapsed time.
    #[must_use]
    pub fn summary_lines(&self) -> [String; 2] {
        [
            self.classification.to_string(),
            format!(
                "Total execution time: {}",
                crate::utils::format_elapsed(self.duration)
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify() {
        assert_eq!(RunClassification::classify(8, 8, 8), RunClassification::FullSuccess);
        assert_eq!(
            RunClassification::classify(2, 2, 8),
            RunClassification::PartialSelectionSuccess
        );
        assert_eq!(
            RunClassification::classify(3, 1, 8),
            RunClassification::Incomplete { completed: 1, total: 3 }
        );
        assert_eq!(
            RunClassification::classify(0, 0, 8),
            RunClassification::PartialSelectionSuccess
        );
        assert_eq!(RunClassification::classify(0, 0, 0), RunClassification::FullSuccess);
    }

    #[test]
    fn test_classification_lines() {
        assert_eq!(
            RunClassification::Incomplete { completed: 1, total: 3 }.to_string(),
            "EXECUTION COMPLETED WITH ERRORS - 1/3 steps completed"
        );
        assert!(RunClassification::FullSuccess.is_success());
        assert!(!RunClassification::Incomplete { completed: 0, total: 1 }.is_success());
    }

    #[test]
    fn test_classification_serialize() {
        let json = serde_json::to_value(RunClassification::Incomplete { completed: 1, total: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "incomplete", "completed": 1, "total": 2}));
    }

    #[test]
    fn test_failure_report_block() {
        let stage = StageDefinition::new(2, "Validate Data").with_unit("v.ipynb");
        let unit = UnitRef::new("v.ipynb");
        let err = RunnerError::execution_failed("v.ipynb", Some(1), "rows: 10", "KeyError");
        let failure = UnitFailure::from_error(&stage, &unit, &err);

        let report = failure.report();
        assert!(report.starts_with("Error: Step 2 (Validate Data) execution failed: v.ipynb"));
        assert!(report.contains("STDERR: KeyError"));
    }
}
