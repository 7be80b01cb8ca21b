use crate::error::DownloaderError;
use crate::types::{Credentials, DownloadOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
// -V belongs to --vendor-id, so the built-in version flag is disabled to
// keep the short flag free.
#[command(author, version, about = "Downloads daily and weekly sales reports via the vendor's Autoingestion tool", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Account id used to sign in to the reporting service
    #[arg(short = 'a', long)]
    pub user_id: String,

    /// Account password (see --password-stdin for prompting)
    #[arg(short = 'p', long, default_value = "")]
    pub password: String,

    /// Prompt for the password instead of passing it on the command line
    #[arg(short = 'P', long)]
    pub password_stdin: bool,

    /// Vendor id the reports are filed under
    #[arg(short = 'V', long)]
    pub vendor_id: String,

    /// Directory where downloaded reports are stored
    #[arg(short = 'o', long, default_value = ".")]
    pub output_directory: PathBuf,

    /// Unzip the downloaded archive file
    #[arg(short = 'u', long)]
    pub unzip: bool,

    /// Download weekly reports instead of daily ones
    #[arg(short = 'w', long)]
    pub weekly: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Number of days (or weeks) to download
    #[arg(short = 'n', long = "number", default_value = "1",
          value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Download the report for this date (mm/dd/yyyy); --number is ignored
    #[arg(short = 'D', long = "date")]
    pub date: Option<String>,

    /// Output file name format (strftime-style)
    #[arg(short = 'f', long = "format")]
    pub filename_format: Option<String>,

    /// Directory holding the Autoingestion class
    #[arg(long, default_value = ".")]
    pub tool_dir: PathBuf,

    /// Debug output; implies --verbose
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Resolves the CLI surface into the immutable run configuration,
    /// prompting for the password when requested.
    pub fn into_options(self) -> Result<DownloadOptions, DownloaderError> {
        let password = if self.password_stdin {
            rpassword::prompt_password("Password: ")?
        } else {
            self.password
        };

        Ok(DownloadOptions {
            credentials: Credentials {
                user_id: self.user_id,
                password,
                vendor_id: self.vendor_id,
            },
            output_directory: self.output_directory,
            unzip: self.unzip,
            weekly: self.weekly,
            verbose: self.verbose || self.debug,
            count: self.count,
            explicit_date: self.date,
            filename_format: self.filename_format,
            debug: self.debug,
            tool_dir: self.tool_dir,
        })
    }
}
