use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

use cfbflow::cli::{render_stage_list, Cli};
use cfbflow::observability::init_tracing;
use cfbflow::pipeline::PipelineExecutor;
use cfbflow::runner::NotebookRunner;
use cfbflow::utils::DatasetLocator;

/// Exit status for an invalid stage catalog.
const EXIT_CONFIGURATION: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format).context("failed to install tracing subscriber")?;

    let registry = match cli.load_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!(code = ?e.code(), ordinals = ?e.ordinals, "Invalid stage catalog");
            eprintln!("Error: {e}");
            return Ok(ExitCode::from(EXIT_CONFIGURATION));
        }
    };

    if cli.list {
        print!("{}", render_stage_list(&registry));
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(ref data_root) = cli.show_datasets {
        let locator = DatasetLocator::new(data_root);
        let mut ok = true;
        for (label, resolved) in [
            ("CFB data", locator.cfb_data_path()),
            ("NCES school locations", locator.nces_data_path()),
        ] {
            match resolved {
                Ok(path) => println!("{label}: {}", path.display()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    ok = false;
                }
            }
        }
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let runner = Arc::new(NotebookRunner::new(cli.runner_config()));
    let executor = PipelineExecutor::new(Arc::new(registry), runner);
    let result = executor.run(&cli.run_request()).await;

    if let Some(ref failure) = result.failure {
        eprintln!("{}", failure.report());
    }
    for line in result.summary_lines() {
        println!("{line}");
    }
    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("failed to encode run result")?;
        println!("{json}");
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
