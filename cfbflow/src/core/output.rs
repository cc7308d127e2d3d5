//! Output captured from a unit that ran to completion.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Captured streams and timing of a successful unit invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOutput {
    /// Captured standard output.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    /// Captured standard error.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    /// Wall-clock time the unit took.
    pub duration: Duration,
}

impl UnitOutput {
    /// Creates an output with no captured text.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an output from captured streams.
    #[must_use]
    pub fn captured(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
        }
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}
