use crate::error::DownloaderError;
use crate::fetcher::Fetcher;
use crate::materializer::Materializer;
use crate::planner;
use crate::types::{DownloadOptions, FetchOutcome, RunSummary};
use chrono::Local;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;

const DEBUG_CAPTURE_FILE: &str = "temp.html";

/// Drives one full run: plan the report dates, then fetch and materialize
/// each one in turn. Unavailable reports are counted and skipped; I/O
/// failures abort the remaining sequence.
pub struct Downloader<'a> {
    options: &'a DownloadOptions,
}

impl<'a> Downloader<'a> {
    pub fn new(options: &'a DownloadOptions) -> Self {
        Self { options }
    }

    pub async fn download_all(&self) -> Result<RunSummary, DownloaderError> {
        fs::create_dir_all(&self.options.output_directory)?;

        let today = Local::now().date_naive();
        let requests = planner::plan_requests(self.options, today)?;
        info!(
            "downloading {} {} sales report(s)",
            requests.len(),
            self.options.period().as_str()
        );

        let fetcher = Fetcher::new(self.options);
        let materializer = Materializer::new(self.options);
        let pb = self.create_progress_bar(requests.len() as u64);

        let mut materialized = Vec::new();
        let mut unavailable = 0;

        for request in &requests {
            pb.set_message(request.date.to_string());
            match fetcher.fetch(request).await? {
                FetchOutcome::Success { raw_path } => {
                    let artifact = materializer.materialize(&raw_path, request.date)?;
                    info!("materialized {}", artifact.display());
                    materialized.push(artifact);
                }
                FetchOutcome::Unavailable => {
                    eprintln!(
                        "{}",
                        format!("Report failed to download for {}", request.date).red()
                    );
                    unavailable += 1;
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        if self.options.debug {
            self.remove_debug_capture()?;
        }

        Ok(RunSummary {
            total_requests: requests.len(),
            materialized,
            unavailable,
        })
    }

    // The ingestion tool leaves a page capture behind in debug mode; it may
    // never have been written, so a missing file is not an error.
    fn remove_debug_capture(&self) -> Result<(), DownloaderError> {
        let capture = self.options.output_directory.join(DEBUG_CAPTURE_FILE);
        match fs::remove_file(&capture) {
            Ok(()) => {
                debug!("removed debug capture {}", capture.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        // The bar would interleave with log output, so hide it when the
        // run is chatty.
        if self.options.verbose {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }
}
