mod cli;
mod downloader;
mod error;
mod fetcher;
mod materializer;
mod planner;
mod types;

use clap::Parser;
use cli::Cli;
use colored::*;
use log::{error, info, LevelFilter};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    info!("starting sales report downloader");

    let options = match cli.into_options() {
        Ok(options) => options,
        Err(e) => {
            error!("failed to resolve options: {}", e);
            eprintln!("{}", e.to_string().red());
            return ExitCode::from(1);
        }
    };

    let downloader = downloader::Downloader::new(&options);
    match downloader.download_all().await {
        Ok(summary) => {
            if !summary.materialized.is_empty() {
                println!("{}", "Downloaded reports:".bold());
                for artifact in &summary.materialized {
                    println!("  {}", artifact.display().to_string().green());
                }
            }

            if summary.unavailable > 0 {
                eprintln!(
                    "{}",
                    format!(
                        "{} report(s) not available - try again later",
                        summary.unavailable
                    )
                    .red()
                );
                ExitCode::from(1)
            } else {
                info!("downloaded {} report(s)", summary.total_requests);
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("download run failed: {}", e);
            eprintln!("{}", e.to_string().red());
            ExitCode::from(1)
        }
    }
}

// --verbose raises the filter to Info and --debug to Debug, but an explicit
// RUST_LOG setting still wins.
fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
