//! Pipeline requests, execution, and results.
//!
//! This module provides:
//! - The per-invocation [`RunRequest`]
//! - The fail-fast [`PipelineExecutor`]
//! - The [`RunResult`] summary and its [`RunClassification`]

mod executor;
mod request;
mod result;

pub use executor::PipelineExecutor;
pub use request::RunRequest;
pub use result::{RunClassification, RunResult, StageReport, UnitFailure};
