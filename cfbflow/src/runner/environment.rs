//! Hints handed to every unit of a run.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Environment variable name the row-subset hint is exposed under.
pub const ROW_SUBSET_HINT: &str = "DATA_SUBSET_ROWS";

/// Per-run context passed down to each unit invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEnvironment {
    /// Limit on the number of rows each unit should consume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_subset_limit: Option<NonZeroUsize>,
}

impl UnitEnvironment {
    /// Creates an environment carrying no hints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row-subset hint.
    #[must_use]
    pub fn with_row_subset_limit(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.row_subset_limit = limit;
        self
    }

    /// Renders the hints as environment variables for a child process.
    #[must_use]
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        self.row_subset_limit
            .map(|rows| (ROW_SUBSET_HINT, rows.to_string()))
            .into_iter()
            .collect()
    }

    /// Returns the names of hints this environment does not carry.
    ///
    /// Process runners strip these so a value inherited from the parent never
    /// leaks into a unit.
    #[must_use]
    pub fn absent_vars(&self) -> Vec<&'static str> {
        if self.row_subset_limit.is_some() {
            Vec::new()
        } else {
            vec![ROW_SUBSET_HINT]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_vars_with_hint() {
        let env = UnitEnvironment::new().with_row_subset_limit(NonZeroUsize::new(10));
        assert_eq!(env.env_vars(), vec![(ROW_SUBSET_HINT, "10".to_string())]);
        assert!(env.absent_vars().is_empty());
    }

    #[test]
    fn test_env_vars_without_hint() {
        let env = UnitEnvironment::new();
        assert!(env.env_vars().is_empty());
        assert_eq!(env.absent_vars(), vec![ROW_SUBSET_HINT]);
    }
}
