//! Progress events emitted by the executor.
//!
//! Event types:
//! - `pipeline.started`, `pipeline.completed`
//! - `stage.started`, `stage.completed`, `stage.failed`
//! - `unit.started`, `unit.completed`, `unit.failed`

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
