use chrono::NaiveDate;
use std::path::PathBuf;

/// Reporting period a single request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Daily,
    Weekly,
}

impl ReportPeriod {
    /// Spelling expected by the ingestion tool's positional arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "Daily",
            ReportPeriod::Weekly => "Weekly",
        }
    }
}

/// One planned report download. Immutable once produced by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub date: NaiveDate,
    pub period: ReportPeriod,
}

/// Result of one ingestion-tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The tool reported success; `raw_path` is the intermediate file it
    /// wrote into the working directory.
    Success { raw_path: PathBuf },
    /// No report for that period; counted, never fatal.
    Unavailable,
}

/// Credentials handed to the ingestion tool verbatim.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
    pub vendor_id: String,
}

/// Run configuration, built once from the CLI and read-only thereafter.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub credentials: Credentials,
    pub output_directory: PathBuf,
    pub unzip: bool,
    pub weekly: bool,
    pub verbose: bool,
    pub count: u32,
    pub explicit_date: Option<String>,
    pub filename_format: Option<String>,
    pub debug: bool,
    /// Directory holding the Autoingestion class, used as the java classpath.
    pub tool_dir: PathBuf,
}

impl DownloadOptions {
    pub fn period(&self) -> ReportPeriod {
        if self.weekly {
            ReportPeriod::Weekly
        } else {
            ReportPeriod::Daily
        }
    }
}

/// Aggregate outcome of a full run, inspected by main to pick the exit code.
#[derive(Debug)]
pub struct RunSummary {
    pub total_requests: usize,
    pub materialized: Vec<PathBuf>,
    pub unavailable: usize,
}
