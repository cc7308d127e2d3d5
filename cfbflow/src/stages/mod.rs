//! Stage definitions and the stage registry.
//!
//! A stage is one ordinal-numbered phase of the pipeline made of one or more
//! executable units. The registry is the fixed, ordered catalog of stages and
//! is read-only once constructed.

mod catalog;
mod definition;
mod registry;

pub use catalog::{college_football_catalog, college_football_stages};
pub use definition::{StageDefinition, UnitRef};
pub use registry::StageRegistry;
