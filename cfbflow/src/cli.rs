//! Command line surface of the `cfbflow` binary.

use clap::Parser;
use std::fmt::Write as _;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::errors::ConfigurationError;
use crate::observability::LogFormat;
use crate::pipeline::RunRequest;
use crate::runner::NotebookRunnerConfig;
use crate::stages::{college_football_catalog, StageRegistry};

/// Run the college football data processing pipeline.
#[derive(Debug, Parser)]
#[command(name = "cfbflow", version)]
#[command(about = "Run the college football data processing pipeline")]
#[command(after_help = "Examples:
  cfbflow                                  # Run all steps
  cfbflow --step 3                         # Run only step 3
  cfbflow --step 1,3,5                     # Run steps 1, 3, and 5
  cfbflow --dataSubsetRows 10              # Run all steps with only 10 rows of data
  cfbflow --step 1 --dataSubsetRows 5      # Run step 1 with only 5 rows")]
pub struct Cli {
    /// Run only the specified step numbers (comma-separated, e.g., 1,3,5)
    #[arg(long, value_delimiter = ',', value_name = "STEPS")]
    pub step: Option<Vec<u32>>,

    /// Number of rows to keep from CFB data (for testing with smaller datasets)
    #[arg(long = "dataSubsetRows", value_name = "ROWS")]
    pub data_subset_rows: Option<NonZeroUsize>,

    /// Directory containing the step notebooks
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Interpreter used to execute notebooks
    #[arg(long, value_name = "PATH", default_value = "python3")]
    pub python: PathBuf,

    /// Per-notebook timeout in seconds; waits indefinitely when omitted
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<f64>,

    /// JSON stage catalog to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print the stage catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Resolve the input CSV files under DATA_ROOT and exit
    #[arg(long, value_name = "DATA_ROOT")]
    pub show_datasets: Option<PathBuf>,

    /// Print the run result as JSON
    #[arg(long)]
    pub json: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Builds the run request from the selection and row flags.
    #[must_use]
    pub fn run_request(&self) -> RunRequest {
        let mut request = RunRequest::all();
        if let Some(ref steps) = self.step {
            request = request.with_steps(steps.iter().copied());
        }
        if let Some(rows) = self.data_subset_rows {
            request = request.with_row_subset_limit(rows);
        }
        request
    }

    /// Builds the notebook runner configuration.
    #[must_use]
    pub fn runner_config(&self) -> NotebookRunnerConfig {
        let config = NotebookRunnerConfig::new()
            .with_interpreter(&self.python)
            .with_source_dir(&self.source_dir);
        match self.timeout_secs {
            Some(seconds) => config.with_timeout(seconds),
            None => config,
        }
    }

    /// Loads the stage registry from `--catalog` or the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the catalog is unreadable or invalid.
    pub fn load_registry(&self) -> Result<StageRegistry, ConfigurationError> {
        match self.catalog {
            Some(ref path) => StageRegistry::from_path(path),
            None => college_football_catalog(),
        }
    }
}

/// Renders the registry as a human-readable listing.
#[must_use]
pub fn render_stage_list(registry: &StageRegistry) -> String {
    let mut out = String::new();
    for stage in registry.all_stages() {
        let _ = writeln!(out, "{stage}: {}", stage.description);
        for unit in &stage.units {
            let _ = writeln!(out, "    {unit}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cfbflow").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_runs_everything() {
        let cli = parse(&[]);
        assert_eq!(cli.run_request(), RunRequest::all());
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(cli.runner_config().timeout().is_none());
    }

    #[test]
    fn test_step_list_parses() {
        let cli = parse(&["--step", "5,1,3"]);
        let ordinals: Vec<u32> = cli
            .run_request()
            .selected_ordinals
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ordinals, vec![1, 3, 5]);
    }

    #[test]
    fn test_data_subset_rows() {
        let cli = parse(&["--step", "1", "--dataSubsetRows", "10"]);
        assert_eq!(cli.run_request().row_subset_limit, NonZeroUsize::new(10));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["cfbflow", "--dataSubsetRows", "0"]).is_err());
        assert!(Cli::try_parse_from(["cfbflow", "--step", "1,x"]).is_err());
    }

    #[test]
    fn test_runner_config_from_flags() {
        let cli = parse(&["--source-dir", "/srv/src", "--python", "/usr/bin/python3.11", "--timeout-secs", "30"]);
        let config = cli.runner_config();
        assert_eq!(config.source_dir, PathBuf::from("/srv/src"));
        assert_eq!(config.interpreter, PathBuf::from("/usr/bin/python3.11"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_huge_timeout_flag_disables_limit() {
        let cli = parse(&["--timeout-secs", "1e20"]);
        assert!(cli.runner_config().timeout().is_none());
    }

    #[test]
    fn test_load_registry_from_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"[{"ordinal": 1, "name": "Only", "units": ["only.ipynb"]}]"#).unwrap();

        let cli = parse(&["--catalog", path.to_str().unwrap()]);
        let registry = cli.load_registry().unwrap();
        assert_eq!(registry.len(), 1);

        assert_eq!(parse(&[]).load_registry().unwrap().len(), 8);
    }

    #[test]
    fn test_render_stage_list() {
        let registry = college_football_catalog().unwrap();
        let listing = render_stage_list(&registry);
        assert!(listing.starts_with("Step 1 - Fetch Data: Download college football data"));
        assert!(listing.contains("    1_fetch_data/school_locations_pipeline.ipynb\n"));
    }
}
