//! Stage and unit specifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::ConfigurationError;

/// Reference to an executable unit, relative to the pipeline source directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitRef(String);

impl UnitRef {
    /// Creates a new unit reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the reference against a base directory.
    #[must_use]
    pub fn resolve_in(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UnitRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Specification for a single pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Position of the stage; unique and positive.
    pub ordinal: u32,
    /// Human-readable label.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Units to run, in order.
    pub units: Vec<UnitRef>,
}

impl StageDefinition {
    /// Creates a new stage with no units.
    #[must_use]
    pub fn new(ordinal: u32, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
            description: String::new(),
            units: Vec::new(),
        }
    }

    /// Appends a unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<UnitRef>) -> Self {
        self.units.push(unit.into());
        self
    }

    /// Replaces the units.
    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = impl Into<UnitRef>>) -> Self {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validates the stage in isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the ordinal is zero or the stage has no units.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.ordinal == 0 {
            return Err(ConfigurationError::zero_ordinal(&self.name));
        }
        if self.units.is_empty() {
            return Err(ConfigurationError::empty_units(self.ordinal, &self.name));
        }
        Ok(())
    }
}

impl fmt::Display for StageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} - {}", self.ordinal, self.name)
    }
}
