//! Locating the input CSV files stages consume.
//!
//! Each dataset lives alone in a well-known directory. Exactly one CSV is
//! expected; none is an error, several is tolerated with a warning and the
//! first file by name wins so the choice is stable across platforms.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Directory holding the college football statistics export.
pub const CFB_DATA_DIR: &str = "college_football_data";

/// Directory holding the NCES postsecondary school locations export.
pub const NCES_DATA_DIR: &str = "postsecondary_school_locations";

/// Errors resolving a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The directory contains no CSV file.
    #[error("No CSV files found in {}", .dir.display())]
    NoCsv {
        /// The directory searched.
        dir: PathBuf,
    },

    /// The directory could not be read.
    #[error("Cannot read dataset directory {}: {source}", .dir.display())]
    Io {
        /// The directory searched.
        dir: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// Returns the single CSV file in `dir`.
///
/// # Errors
///
/// Returns [`DatasetError::NoCsv`] if the directory has no `.csv` file and
/// [`DatasetError::Io`] if it cannot be listed.
pub fn resolve_single_csv(dir: &Path) -> Result<PathBuf, DatasetError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DatasetError::Io {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut csv_files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    csv_files.sort();

    let mut iter = csv_files.into_iter();
    let first = iter.next().ok_or_else(|| DatasetError::NoCsv {
        dir: dir.to_path_buf(),
    })?;

    let extra: Vec<PathBuf> = iter.collect();
    if !extra.is_empty() {
        warn!(
            dir = %dir.display(),
            chosen = %first.display(),
            ignored = ?extra,
            "Multiple CSV files found; using the first one"
        );
    }
    Ok(first)
}

/// Resolves the pipeline's input datasets under a data root.
#[derive(Debug, Clone)]
pub struct DatasetLocator {
    data_root: PathBuf,
}

impl DatasetLocator {
    /// Creates a locator rooted at `data_root`.
    #[must_use]
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    /// Path to the college football statistics CSV.
    ///
    /// # Errors
    ///
    /// See [`resolve_single_csv`].
    pub fn cfb_data_path(&self) -> Result<PathBuf, DatasetError> {
        resolve_single_csv(&self.data_root.join(CFB_DATA_DIR))
    }

    /// Path to the school locations CSV.
    ///
    /// # Errors
    ///
    /// See [`resolve_single_csv`].
    pub fn nces_data_path(&self) -> Result<PathBuf, DatasetError> {
        resolve_single_csv(&self.data_root.join(NCES_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_single_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("games.csv"), "a,b\n").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let path = resolve_single_csv(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "games.csv");
    }

    #[test]
    fn test_no_csv_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let err = resolve_single_csv(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::NoCsv { .. }));
    }

    #[test]
    fn test_multiple_csv_picks_first_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_2024.csv"), "").unwrap();
        fs::write(dir.path().join("a_2023.csv"), "").unwrap();

        let path = resolve_single_csv(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "a_2023.csv");
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_single_csv(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_locator_uses_well_known_dirs() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join(CFB_DATA_DIR)).unwrap();
        fs::create_dir(root.path().join(NCES_DATA_DIR)).unwrap();
        fs::write(root.path().join(CFB_DATA_DIR).join("cfb.csv"), "").unwrap();

        let locator = DatasetLocator::new(root.path());
        assert!(locator.cfb_data_path().unwrap().ends_with("college_football_data/cfb.csv"));
        assert!(matches!(
            locator.nces_data_path().unwrap_err(),
            DatasetError::NoCsv { .. }
        ));
    }
}
