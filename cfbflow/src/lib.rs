//! # cfbflow
//!
//! Sequential stage runner for the college football weather dataset pipeline.
//!
//! The pipeline is a fixed, ordered list of stages. Each stage bundles one or
//! more executable units (notebooks) that must run in order. The executor:
//!
//! - **Selects stages**: all of them, or a subset by ordinal
//! - **Runs sequentially**: one stage at a time, one unit at a time
//! - **Fails fast**: the first failing unit aborts its stage and the run
//! - **Propagates hints**: an optional row-subset limit reaches every unit
//! - **Summarizes**: counts, failing ordinal, duration, and a classification
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cfbflow::prelude::*;
//!
//! # async fn demo() -> Result<(), ConfigurationError> {
//! let registry = Arc::new(college_football_catalog()?);
//! let runner = Arc::new(NotebookRunner::new(NotebookRunnerConfig::new().with_source_dir("src")));
//! let executor = PipelineExecutor::new(registry, runner);
//!
//! let result = executor.run(&RunRequest::all().with_steps([1, 3])).await;
//! println!("{}", result.classification);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cli;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod runner;
pub mod stages;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{RunState, StageStatus, UnitOutput};
    pub use crate::errors::{ConfigurationError, FailureKind, RunnerError};
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{
        PipelineExecutor, RunClassification, RunRequest, RunResult, StageReport, UnitFailure,
    };
    pub use crate::runner::{
        NotebookRunner, NotebookRunnerConfig, UnitEnvironment, UnitRunner, ROW_SUBSET_HINT,
    };
    pub use crate::stages::{
        college_football_catalog, StageDefinition, StageRegistry, UnitRef,
    };
}
