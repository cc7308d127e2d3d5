//! Core domain model types for cfbflow.
//!
//! This module contains the fundamental types used throughout the runner:
//! - Stage and run status enums
//! - The output captured from a successful unit

mod output;
mod status;

pub use output::UnitOutput;
pub use status::{RunState, StageStatus};
