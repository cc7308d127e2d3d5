//! Configuration for the notebook runner.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for launching notebooks as child processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookRunnerConfig {
    /// Interpreter executable.
    #[serde(default = "default_interpreter")]
    pub interpreter: PathBuf,
    /// Arguments placed between the interpreter and the unit path.
    #[serde(default = "default_launcher_args")]
    pub launcher_args: Vec<String>,
    /// Directory units are resolved against and run from.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Per-unit timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
}

fn default_interpreter() -> PathBuf {
    PathBuf::from("python3")
}

fn default_launcher_args() -> Vec<String> {
    [
        "-m",
        "nbconvert",
        "--to",
        "notebook",
        "--execute",
        "--inplace",
        "--ExecutePreprocessor.timeout=-1",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for NotebookRunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            launcher_args: default_launcher_args(),
            source_dir: default_source_dir(),
            timeout_seconds: None,
        }
    }
}

impl NotebookRunnerConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interpreter.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Replaces the launcher arguments.
    #[must_use]
    pub fn with_launcher_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.launcher_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the source directory.
    #[must_use]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Sets the per-unit timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Returns the timeout as a duration.
    ///
    /// Non-positive, non-finite, or unrepresentably large values mean no
    /// timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|s| *s > 0.0)
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotebookRunnerConfig::default();
        assert_eq!(config.interpreter, PathBuf::from("python3"));
        assert_eq!(config.launcher_args[1], "nbconvert");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_timeout_conversion() {
        let config = NotebookRunnerConfig::new().with_timeout(1.5);
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));

        assert!(NotebookRunnerConfig::new().with_timeout(0.0).timeout().is_none());
        assert!(NotebookRunnerConfig::new().with_timeout(-1.0).timeout().is_none());
    }

    #[test]
    fn test_oversized_timeout_means_no_limit() {
        assert!(NotebookRunnerConfig::new().with_timeout(1e20).timeout().is_none());
        assert!(NotebookRunnerConfig::new().with_timeout(f64::INFINITY).timeout().is_none());
        assert!(NotebookRunnerConfig::new().with_timeout(f64::NAN).timeout().is_none());

        let config: NotebookRunnerConfig =
            serde_json::from_str(r#"{"timeout_seconds": 1e300}"#).unwrap();
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: NotebookRunnerConfig =
            serde_json::from_str(r#"{"source_dir": "/data/src", "timeout_seconds": 60}"#).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("/data/src"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.launcher_args, default_launcher_args());
    }
}
