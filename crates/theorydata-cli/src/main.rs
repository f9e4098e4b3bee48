mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};
use theorydata_core::config::DEFAULT_LOG_FILTER;
use theorydata_core::{
    discover_case_files, load_case_file, ArgsMode, Config, ExpectedPolicy, RowHolder,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use output::{CheckSummary, FileRows};

#[derive(Parser)]
#[command(name = "theorydata")]
#[command(about = "Inspect test case files as parameterized test rows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the rows generated from case files
    Rows {
        /// Case file, or directory to scan for case files
        path: PathBuf,
        /// Argument mode: whole_object or flattened
        #[arg(long)]
        mode: Option<ArgsMode>,
        /// Test method name used to build display names
        #[arg(long)]
        method: Option<String>,
        /// Expected value policy: by_exit_mode, include or trim
        #[arg(long)]
        expected: Option<ExpectedPolicy>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate case files and report dropped duplicates
    Check {
        /// Case file, or directory to scan for case files
        path: PathBuf,
    },
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = Config::load().wrap_err("Failed to load configuration")?;
    init_tracing(&config.logging.filter);

    match cli.command {
        Commands::Rows {
            path,
            mode,
            method,
            expected,
            json,
        } => {
            let mode = mode.unwrap_or(config.conversion.mode);
            let policy = expected.unwrap_or(config.conversion.expected);
            let reports = collect_rows(&config, &path, mode, policy, method.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    report.print_table();
                }
            }
        }
        Commands::Check { path } => check(&config, &path)?,
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn case_files(config: &Config, path: &Path) -> Result<Vec<PathBuf>> {
    let files = discover_case_files(path, &config.cases.extensions)
        .wrap_err_with(|| format!("Failed to scan {}", path.display()))?;
    if files.is_empty() {
        warn!(path = %path.display(), "no case files found");
    }
    Ok(files)
}

fn collect_rows(
    config: &Config,
    path: &Path,
    mode: ArgsMode,
    policy: ExpectedPolicy,
    method: Option<&str>,
) -> Result<Vec<FileRows>> {
    let mut reports = Vec::new();

    for file in case_files(config, path)? {
        let case_file = load_case_file(&file)
            .wrap_err_with(|| format!("Failed to load {}", file.display()))?;
        let method = method
            .map(str::to_string)
            .or_else(|| case_file.method.clone())
            .or_else(|| config.naming.method_name.clone());

        let holder = case_file
            .into_holder(mode, policy)
            .wrap_err_with(|| format!("Invalid cases in {}", file.display()))?;
        let rows = holder.rows(None, method.as_deref());
        debug!(path = %file.display(), rows = rows.len(), "rows generated");

        reports.push(FileRows::new(&file, &rows));
    }

    Ok(reports)
}

fn check(config: &Config, path: &Path) -> Result<()> {
    let files = case_files(config, path)?;
    let mut failed = 0;

    for file in &files {
        match check_file(config, file) {
            Ok(summary) => summary.print_line(),
            Err(err) => {
                failed += 1;
                println!("error  {}: {:#}", file.display(), err);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} case files are invalid", failed, files.len());
    }
    Ok(())
}

fn check_file(config: &Config, file: &Path) -> Result<CheckSummary> {
    let case_file = load_case_file(file)?;
    let cases = case_file.to_cases()?;
    let count = cases.len();
    let holder = RowHolder::from_cases(config.conversion.mode, cases);

    Ok(CheckSummary {
        path: file.display().to_string(),
        cases: count,
        rows: holder.len(),
        duplicates: count - holder.len(),
    })
}
