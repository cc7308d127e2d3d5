//! The ordered, read-only stage catalog.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::debug;

use super::StageDefinition;
use crate::errors::{ConfigurationError, ContractErrorInfo};

/// A validated, ordinal-sorted catalog of stages.
///
/// Construction is the only place validation happens: once a registry exists
/// every stage has a unique positive ordinal and at least one unit.
#[derive(Debug, Clone)]
pub struct StageRegistry {
    stages: Vec<StageDefinition>,
}

impl StageRegistry {
    /// Creates a registry from stage definitions in any order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a stage has no units, uses ordinal
    /// zero, or shares its ordinal with another stage.
    pub fn new(stages: impl IntoIterator<Item = StageDefinition>) -> Result<Self, ConfigurationError> {
        let mut stages: Vec<StageDefinition> = stages.into_iter().collect();

        {
            let mut seen: HashMap<u32, &str> = HashMap::with_capacity(stages.len());
            for stage in &stages {
                stage.validate()?;
                if let Some(first) = seen.insert(stage.ordinal, &stage.name) {
                    return Err(ConfigurationError::duplicate_ordinal(
                        stage.ordinal,
                        first,
                        &stage.name,
                    ));
                }
            }
        }

        stages.sort_by_key(|s| s.ordinal);
        debug!(stage_count = stages.len(), "Stage registry built");

        Ok(Self { stages })
    }

    /// Parses a registry from a JSON array of stage definitions.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the JSON is malformed or the
    /// stages fail validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let stages: Vec<StageDefinition> = serde_json::from_str(json).map_err(|e| {
            let mut err = ConfigurationError::new(format!("Invalid stage catalog: {e}"));
            err.error_info = Some(
                ContractErrorInfo::new("REGISTRY-004-CATALOG", e.to_string())
                    .with_fix_hint("The catalog must be a JSON array of {ordinal, name, description, units}."),
            );
            err
        })?;
        Self::new(stages)
    }

    /// Loads a registry from a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::new(format!(
                "Cannot read stage catalog {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    /// Returns every stage in ascending ordinal order.
    #[must_use]
    pub fn all_stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    /// Returns the stages to run for an optional ordinal filter.
    ///
    /// `None` selects everything. Ordinals that are not in the registry are
    /// ignored; the result is always in ascending ordinal order.
    #[must_use]
    pub fn select_stages(&self, selected: Option<&BTreeSet<u32>>) -> Vec<&StageDefinition> {
        match selected {
            None => self.stages.iter().collect(),
            Some(ordinals) => self
                .stages
                .iter()
                .filter(|s| ordinals.contains(&s.ordinal))
                .collect(),
        }
    }

    /// Looks up a stage by ordinal.
    #[must_use]
    pub fn get(&self, ordinal: u32) -> Option<&StageDefinition> {
        self.stages
            .binary_search_by_key(&ordinal, |s| s.ordinal)
            .ok()
            .map(|idx| &self.stages[idx])
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the registry has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abc() -> StageRegistry {
        StageRegistry::new([
            StageDefinition::new(3, "C").with_unit("u3"),
            StageDefinition::new(1, "A").with_unit("u1"),
            StageDefinition::new(2, "B").with_units(["u2a", "u2b"]),
        ])
        .unwrap()
    }

    fn ordinals(stages: &[&StageDefinition]) -> Vec<u32> {
        stages.iter().map(|s| s.ordinal).collect()
    }

    #[test]
    fn test_all_stages_sorted() {
        let registry = abc();
        let all: Vec<u32> = registry.all_stages().iter().map(|s| s.ordinal).collect();
        assert_eq!(all, vec![1, 2, 3]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_all_stages_stable_across_calls() {
        let registry = abc();
        assert_eq!(registry.all_stages(), registry.all_stages());
    }

    #[test]
    fn test_select_none_returns_all() {
        let registry = abc();
        let selected = registry.select_stages(None);
        assert_eq!(ordinals(&selected), vec![1, 2, 3]);
    }

    #[test]
    fn test_select_preserves_registry_order() {
        let registry = abc();
        let wanted = BTreeSet::from([3, 1]);
        assert_eq!(ordinals(&registry.select_stages(Some(&wanted))), vec![1, 3]);
    }

    #[test]
    fn test_select_ignores_unknown_ordinals() {
        let registry = abc();
        let wanted = BTreeSet::from([2, 9, 42]);
        assert_eq!(ordinals(&registry.select_stages(Some(&wanted))), vec![2]);

        let none_known = BTreeSet::from([7]);
        assert!(registry.select_stages(Some(&none_known)).is_empty());
    }

    #[test]
    fn test_gaps_are_legal() {
        let registry = StageRegistry::new([
            StageDefinition::new(10, "Ten").with_unit("t"),
            StageDefinition::new(2, "Two").with_unit("w"),
        ])
        .unwrap();

        assert_eq!(registry.get(10).map(|s| s.name.as_str()), Some("Ten"));
        assert!(registry.get(5).is_none());
        let wanted = BTreeSet::from([10]);
        assert_eq!(ordinals(&registry.select_stages(Some(&wanted))), vec![10]);
    }

    #[test]
    fn test_empty_units_rejected() {
        let err = StageRegistry::new([
            StageDefinition::new(1, "A").with_unit("u1"),
            StageDefinition::new(2, "B"),
        ])
        .unwrap_err();
        assert_eq!(err.code(), Some("REGISTRY-001-EMPTY_UNITS"));
    }

    #[test]
    fn test_duplicate_ordinal_rejected() {
        let err = StageRegistry::new([
            StageDefinition::new(1, "A").with_unit("u1"),
            StageDefinition::new(1, "A again").with_unit("u1b"),
        ])
        .unwrap_err();
        assert_eq!(err.code(), Some("REGISTRY-002-DUPLICATE"));
        assert_eq!(err.ordinals, vec![1]);
    }

    #[test]
    fn test_from_json() {
        let registry = StageRegistry::from_json(
            r#"[
                {"ordinal": 2, "name": "B", "units": ["u2"]},
                {"ordinal": 1, "name": "A", "description": "first", "units": ["u1"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(registry.all_stages()[0].description, "first");
        assert_eq!(registry.all_stages()[1].name, "B");
    }

    #[test]
    fn test_from_json_malformed() {
        let err = StageRegistry::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), Some("REGISTRY-004-CATALOG"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StageRegistry::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read stage catalog"));
    }
}
