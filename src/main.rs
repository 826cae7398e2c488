use anyhow::{Context, Result};
use clap::Parser;
use montage::cli::Cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Set up logging directory
    let log_dir = montage::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Write to file
    let file_appender = tracing_appender::rolling::never(&log_dir, "montage.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    let result = Cli::parse().execute();

    // Flush buffered log lines before the process exits
    drop(guard);

    result
}
