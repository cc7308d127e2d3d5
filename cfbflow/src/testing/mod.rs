//! Testing utilities for cfbflow pipelines.
//!
//! This module provides a scripted [`UnitRunner`](crate::runner::UnitRunner)
//! that records every call, so tests can assert exactly which units ran and
//! which hints they saw.

mod mocks;

pub use mocks::{RecordedCall, ScriptedOutcome, ScriptedRunner};
