//! Utility functions shared by the runner and by stage collaborators.
//!
//! - Elapsed-time formatting for run summaries
//! - Dataset CSV resolution

mod datasets;
pub mod timestamps;

pub use datasets::{
    resolve_single_csv, DatasetError, DatasetLocator, CFB_DATA_DIR, NCES_DATA_DIR,
};
pub use timestamps::format_elapsed;
