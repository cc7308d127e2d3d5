//! Per-invocation run request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::runner::UnitEnvironment;

/// What to run and with which hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Ordinals to run; `None` runs every stage.
    #[serde(default)]
    pub selected_ordinals: Option<BTreeSet<u32>>,
    /// Row limit propagated to every unit.
    #[serde(default)]
    pub row_subset_limit: Option<NonZeroUsize>,
}

impl RunRequest {
    /// Creates a request that runs every stage on full data.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the run to the given ordinals.
    ///
    /// Order and duplicates do not matter; registry order always wins.
    #[must_use]
    pub fn with_steps(mut self, ordinals: impl IntoIterator<Item = u32>) -> Self {
        self.selected_ordinals = Some(ordinals.into_iter().collect());
        self
    }

    /// Sets the row-subset hint.
    #[must_use]
    pub fn with_row_subset_limit(mut self, rows: NonZeroUsize) -> Self {
        self.row_subset_limit = Some(rows);
        self
    }

    /// Builds the environment handed to each unit.
    #[must_use]
    pub fn unit_environment(&self) -> UnitEnvironment {
        UnitEnvironment::new().with_row_subset_limit(self.row_subset_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_steps_deduplicates_and_sorts() {
        let request = RunRequest::all().with_steps([5, 1, 3, 1]);
        let ordinals: Vec<u32> = request.selected_ordinals.unwrap().into_iter().collect();
        assert_eq!(ordinals, vec![1, 3, 5]);
    }

    #[test]
    fn test_unit_environment_carries_hint() {
        let rows = NonZeroUsize::new(25).unwrap();
        let request = RunRequest::all().with_row_subset_limit(rows);
        assert_eq!(request.unit_environment().row_subset_limit, Some(rows));
        assert!(RunRequest::all().unit_environment().row_subset_limit.is_none());
    }
}
