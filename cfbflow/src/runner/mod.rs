//! The executable-unit runner boundary.
//!
//! The executor never knows how a unit runs. It resolves and invokes units
//! through [`UnitRunner`], passing the run's hints as an explicit
//! [`UnitEnvironment`] rather than through the process environment.

mod config;
mod environment;
mod notebook;

pub use config::NotebookRunnerConfig;
pub use environment::{UnitEnvironment, ROW_SUBSET_HINT};
pub use notebook::NotebookRunner;

use async_trait::async_trait;
use std::fmt::Debug;

use crate::core::UnitOutput;
use crate::errors::RunnerError;
use crate::stages::UnitRef;

/// Capability that physically executes one unit of work.
#[async_trait]
pub trait UnitRunner: Send + Sync + Debug {
    /// Checks that the unit resolves to an invocable artifact.
    ///
    /// Called before [`UnitRunner::run_unit`]; the default accepts every unit.
    fn resolve(&self, _unit: &UnitRef) -> Result<(), RunnerError> {
        Ok(())
    }

    /// Runs the unit to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`RunnerError`] describing why the unit did not succeed.
    async fn run_unit(
        &self,
        unit: &UnitRef,
        env: &UnitEnvironment,
    ) -> Result<UnitOutput, RunnerError>;
}
