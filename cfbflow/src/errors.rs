//! Error types for the cfbflow pipeline runner.
//!
//! Unit-level failures ([`RunnerError`]) are caught by the executor and turned
//! into a fail-fast abort. [`ConfigurationError`] is the only class that stops
//! a run from starting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Metadata about a configuration error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "REGISTRY-002-DUPLICATE").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error raised when the stage registry is declared incorrectly.
///
/// Detected at startup, before any stage runs.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    /// The error message.
    pub message: String,
    /// Ordinals of the stages involved.
    pub ordinals: Vec<u32>,
    /// Structured diagnostic info.
    pub error_info: Option<ContractErrorInfo>,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ordinals: Vec::new(),
            error_info: None,
        }
    }

    /// A stage was declared without executable units.
    #[must_use]
    pub fn empty_units(ordinal: u32, name: &str) -> Self {
        let info = ContractErrorInfo::new(
            "REGISTRY-001-EMPTY_UNITS",
            format!("Stage {ordinal} ('{name}') declares no executable units"),
        )
        .with_fix_hint("Give every stage at least one unit reference.")
        .with_context_entry("stage", name);

        Self {
            message: format!("Step {ordinal} has no notebook(s) defined"),
            ordinals: vec![ordinal],
            error_info: Some(info),
        }
    }

    /// Two stages share an ordinal.
    #[must_use]
    pub fn duplicate_ordinal(ordinal: u32, first: &str, second: &str) -> Self {
        let info = ContractErrorInfo::new(
            "REGISTRY-002-DUPLICATE",
            format!("Ordinal {ordinal} is used by both '{first}' and '{second}'"),
        )
        .with_fix_hint("Ordinals must be unique; renumber one of the stages.");

        Self {
            message: format!("Duplicate stage ordinal {ordinal} ('{first}', '{second}')"),
            ordinals: vec![ordinal],
            error_info: Some(info),
        }
    }

    /// A stage used ordinal 0.
    #[must_use]
    pub fn zero_ordinal(name: &str) -> Self {
        let info = ContractErrorInfo::new(
            "REGISTRY-003-ORDINAL",
            format!("Stage '{name}' uses ordinal 0"),
        )
        .with_fix_hint("Ordinals are positive integers starting at 1.");

        Self {
            message: format!("Stage '{name}' must have a positive ordinal"),
            ordinals: vec![0],
            error_info: Some(info),
        }
    }

    /// Returns the stable error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }
}

/// Failures surfaced while resolving or invoking a single executable unit.
#[derive(Debug, Clone, Error)]
pub enum RunnerError {
    /// The unit reference does not resolve to a real artifact.
    #[error("Notebook not found: {}", .path.display())]
    UnitNotFound {
        /// The unit reference as declared.
        unit: String,
        /// The path that was checked.
        path: PathBuf,
    },

    /// The unit ran and reported failure.
    #[error("Notebook {unit} failed with return code {}", .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    ExecutionFailed {
        /// The unit reference.
        unit: String,
        /// Process exit code; `None` when terminated by a signal.
        exit_code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The unit exceeded its time budget.
    #[error("Notebook {unit} timed out after {}s", .timeout.as_secs_f64())]
    TimedOut {
        /// The unit reference.
        unit: String,
        /// The budget that was exceeded.
        timeout: Duration,
    },

    /// Any other failure from the runner, such as an I/O error launching the unit.
    #[error("Unexpected error running notebook {unit}: {message}")]
    Unexpected {
        /// The unit reference.
        unit: String,
        /// The underlying error message.
        message: String,
    },
}

impl RunnerError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(unit: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::UnitNotFound {
            unit: unit.into(),
            path: path.into(),
        }
    }

    /// Creates an execution failure.
    #[must_use]
    pub fn execution_failed(
        unit: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ExecutionFailed {
            unit: unit.into(),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timed_out(unit: impl Into<String>, timeout: Duration) -> Self {
        Self::TimedOut {
            unit: unit.into(),
            timeout,
        }
    }

    /// Creates an unexpected runner error.
    #[must_use]
    pub fn unexpected(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unexpected {
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnitNotFound { .. } => FailureKind::NotFound,
            Self::ExecutionFailed { .. } => FailureKind::ExecutionFailed,
            Self::TimedOut { .. } => FailureKind::TimedOut,
            Self::Unexpected { .. } => FailureKind::Unexpected,
        }
    }

    /// Returns the captured diagnostic text, if the runner produced any.
    #[must_use]
    pub fn diagnostic_text(&self) -> Option<String> {
        match self {
            Self::ExecutionFailed { stdout, stderr, .. } => {
                Some(format!("STDOUT: {stdout}\nSTDERR: {stderr}"))
            }
            Self::Unexpected { message, .. } => Some(message.clone()),
            Self::UnitNotFound { .. } | Self::TimedOut { .. } => None,
        }
    }
}

/// Classification of a unit failure for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The unit artifact does not exist.
    NotFound,
    /// The unit ran and failed.
    ExecutionFailed,
    /// The unit exceeded its timeout.
    TimedOut,
    /// The runner itself failed unexpectedly.
    Unexpected,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::ExecutionFailed => write!(f, "execution failed"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Unexpected => write!(f, "unexpected error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_info_creation() {
        let info = ContractErrorInfo::new("TEST-001", "Test error")
            .with_fix_hint("Fix this by doing that")
            .with_context_entry("stage", "Fetch Data");

        assert_eq!(info.code, "TEST-001");
        assert_eq!(info.fix_hint, Some("Fix this by doing that".to_string()));
        assert_eq!(info.context.get("stage"), Some(&"Fetch Data".to_string()));
    }

    #[test]
    fn test_configuration_error_codes() {
        let err = ConfigurationError::empty_units(4, "Fetch Venue Locations");
        assert_eq!(err.code(), Some("REGISTRY-001-EMPTY_UNITS"));
        assert_eq!(err.ordinals, vec![4]);
        assert!(err.to_string().contains("Step 4"));

        let err = ConfigurationError::duplicate_ordinal(2, "a", "b");
        assert_eq!(err.code(), Some("REGISTRY-002-DUPLICATE"));

        assert!(ConfigurationError::new("plain").code().is_none());
    }

    #[test]
    fn test_runner_error_kinds_are_distinct() {
        let not_found = RunnerError::not_found("x.ipynb", "/src/x.ipynb");
        let failed = RunnerError::execution_failed("x.ipynb", Some(1), "out", "err");
        let timed_out = RunnerError::timed_out("x.ipynb", Duration::from_secs(5));

        assert_eq!(not_found.kind().to_string(), "not found");
        assert_eq!(failed.kind().to_string(), "execution failed");
        assert_eq!(timed_out.kind().to_string(), "timed out");
        assert!(failed.to_string().contains("return code 1"));
    }

    #[test]
    fn test_diagnostic_text_includes_streams() {
        let failed = RunnerError::execution_failed("x.ipynb", None, "hello", "boom");
        let text = failed.diagnostic_text().unwrap();
        assert!(text.contains("STDOUT: hello"));
        assert!(text.contains("STDERR: boom"));
        assert!(failed.to_string().contains("return code none"));

        assert!(RunnerError::timed_out("x", Duration::from_secs(1))
            .diagnostic_text()
            .is_none());
    }
}
