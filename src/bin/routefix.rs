//! routefix CLI binary entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use routefix::error::ExitStatus;
use routefix::run::{run, RunConfig};

/// Rewrite Next.js route handlers to the async params contract.
#[derive(Parser)]
#[command(name = "routefix")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Root directory to scan (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// File name candidates must match exactly
    #[arg(long, default_value = "route.ts")]
    target_filename: String,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,

    /// Emit a JSON run summary instead of the plain-text closing line
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let root = cli
        .root
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = RunConfig {
        root,
        target_filename: cli.target_filename,
        dry_run: cli.dry_run,
    };

    // In JSON mode, stdout carries only the summary document.
    let mut fix_lines: Box<dyn io::Write> = if cli.json {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };

    let summary = match run(&config, &mut fix_lines) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("routefix: {err}");
            return ExitCode::from(ExitStatus::InvalidArguments.code());
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("routefix: failed to serialize summary: {err}");
                return ExitCode::from(ExitStatus::SkippedFiles.code());
            }
        }
    } else {
        println!("\n{}", summary.summary_line());
    }

    if summary.has_skipped() {
        ExitCode::from(ExitStatus::SkippedFiles.code())
    } else {
        ExitCode::from(ExitStatus::Success.code())
    }
}
