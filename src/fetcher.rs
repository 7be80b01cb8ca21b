use crate::error::DownloaderError;
use crate::types::{DownloadOptions, FetchOutcome, ReportRequest};
use log::{debug, info};
use std::path::PathBuf;
use tokio::process::Command;

const REPORT_TYPE: &str = "Sales";
const REPORT_SUBTYPE: &str = "Summary";
const SUCCESS_MARKER: &str = "file downloaded successfully";

/// Boundary to the vendor's ingestion tool. One invocation per report
/// request; the tool writes its file into the working directory and
/// announces the name on stdout.
pub struct Fetcher<'a> {
    options: &'a DownloadOptions,
}

impl<'a> Fetcher<'a> {
    pub fn new(options: &'a DownloadOptions) -> Self {
        Self { options }
    }

    pub async fn fetch(&self, request: &ReportRequest) -> Result<FetchOutcome, DownloaderError> {
        let date_arg = request.date.format("%Y%m%d").to_string();
        let creds = &self.options.credentials;
        info!("fetching {} report for {}", request.period.as_str(), request.date);

        let output = Command::new("java")
            .arg("-cp")
            .arg(&self.options.tool_dir)
            .arg("Autoingestion")
            .arg(&creds.user_id)
            .arg(&creds.password)
            .arg(&creds.vendor_id)
            .arg(REPORT_TYPE)
            .arg(request.period.as_str())
            .arg(REPORT_SUBTYPE)
            .arg(&date_arg)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("ingestion tool exit status: {}", output.status);
        println!("{}", stdout);

        match parse_tool_output(&stdout) {
            Some(raw_name) => Ok(FetchOutcome::Success {
                raw_path: PathBuf::from(raw_name),
            }),
            None => Ok(FetchOutcome::Unavailable),
        }
    }
}

/// Applies the tool's stdout contract: line one names the downloaded file,
/// line two confirms the download. Anything else means the report was not
/// available. Kept separate so a wording change in the tool only lands here.
fn parse_tool_output(stdout: &str) -> Option<&str> {
    let mut lines = stdout.lines();
    let first = lines.next()?;
    let second = lines.next()?;
    if second.to_lowercase().starts_with(SUCCESS_MARKER) {
        Some(first.trim())
    } else {
        None
    }
}
