use crate::error::DownloaderError;
use crate::types::DownloadOptions;
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use log::info;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Turns the ingestion tool's raw download into the final artifact:
/// optional gzip decompression, renaming through the strftime template,
/// and deletion of the intermediate file.
pub struct Materializer<'a> {
    options: &'a DownloadOptions,
}

impl<'a> Materializer<'a> {
    pub fn new(options: &'a DownloadOptions) -> Self {
        Self { options }
    }

    pub fn materialize(
        &self,
        raw_path: &Path,
        report_date: NaiveDate,
    ) -> Result<PathBuf, DownloaderError> {
        let mut base_name = match &self.options.filename_format {
            Some(format) => render_file_name(report_date, format)?,
            None => raw_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| raw_path.to_string_lossy().into_owned()),
        };

        let contents = if self.options.unzip {
            info!("unzipping archive file {}", raw_path.display());
            let mut decoder = GzDecoder::new(File::open(raw_path)?);
            let mut buf = Vec::new();
            decoder.read_to_end(&mut buf)?;
            buf
        } else {
            fs::read(raw_path)?
        };

        // The decompressed artifact keeps the archive's name minus the
        // .gz suffix.
        if self.options.unzip {
            if let Some(stripped) = base_name.strip_suffix(".gz") {
                base_name = stripped.to_string();
            }
        }

        let final_path = self.options.output_directory.join(base_name);
        info!("saving download file {}", final_path.display());
        fs::write(&final_path, &contents)?;

        info!("deleting archive file {}", raw_path.display());
        fs::remove_file(raw_path)?;

        Ok(final_path)
    }
}

fn render_file_name(date: NaiveDate, format: &str) -> Result<String, DownloaderError> {
    use std::fmt::Write;
    let mut name = String::new();
    // chrono surfaces an unknown specifier as a fmt::Error at render time.
    write!(name, "{}", date.format(format))
        .map_err(|_| DownloaderError::InvalidFilenameFormat(format.to_string()))?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Credentials;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn options(dir: &TempDir, unzip: bool, filename_format: Option<&str>) -> DownloadOptions {
        DownloadOptions {
            credentials: Credentials {
                user_id: "user".into(),
                password: "secret".into(),
                vendor_id: "80012345".into(),
            },
            output_directory: dir.path().to_path_buf(),
            unzip,
            weekly: false,
            verbose: false,
            count: 1,
            explicit_date: None,
            filename_format: filename_format.map(String::from),
            debug: false,
            tool_dir: ".".into(),
        }
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn gzip_bytes(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    // Stands in for the working directory the ingestion tool writes into,
    // kept apart from the output directory.
    fn work_dir(dir: &TempDir) -> PathBuf {
        let work = dir.path().join("work");
        fs::create_dir_all(&work).unwrap();
        work
    }

    #[test]
    fn raw_bytes_are_preserved_without_unzip() {
        let dir = TempDir::new().unwrap();
        let raw = work_dir(&dir).join("sales_20240314.txt.gz");
        fs::write(&raw, b"raw report bytes").unwrap();

        let opts = options(&dir, false, None);
        let artifact = Materializer::new(&opts).materialize(&raw, report_date()).unwrap();

        assert_eq!(artifact, dir.path().join("sales_20240314.txt.gz"));
        assert_eq!(fs::read(&artifact).unwrap(), b"raw report bytes");
    }

    #[test]
    fn unzip_decompresses_and_strips_the_gz_suffix() {
        let dir = TempDir::new().unwrap();
        let raw = work_dir(&dir).join("sales_20240314.txt.gz");
        fs::write(&raw, gzip_bytes(b"tab\tseparated\treport\n")).unwrap();

        let opts = options(&dir, true, None);
        let artifact = Materializer::new(&opts).materialize(&raw, report_date()).unwrap();

        assert_eq!(artifact, dir.path().join("sales_20240314.txt"));
        assert_eq!(fs::read(&artifact).unwrap(), b"tab\tseparated\treport\n");
    }

    #[test]
    fn raw_file_is_deleted_after_materialization() {
        let dir = TempDir::new().unwrap();
        let raw = work_dir(&dir).join("sales.txt.gz");
        fs::write(&raw, b"bytes").unwrap();

        let opts = options(&dir, false, None);
        Materializer::new(&opts).materialize(&raw, report_date()).unwrap();

        assert!(!raw.exists());
    }

    #[test]
    fn filename_format_renders_the_report_date() {
        let dir = TempDir::new().unwrap();
        let raw = work_dir(&dir).join("S_D_80012345.txt.gz");
        fs::write(&raw, b"bytes").unwrap();

        let opts = options(&dir, false, Some("sales-%Y-%m-%d.txt.gz"));
        let artifact = Materializer::new(&opts).materialize(&raw, report_date()).unwrap();

        assert_eq!(artifact, dir.path().join("sales-2024-03-14.txt.gz"));
    }

    #[test]
    fn second_run_overwrites_the_artifact() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, false, None);
        let materializer = Materializer::new(&opts);

        for payload in [&b"first"[..], &b"second"[..]] {
            let raw = work_dir(&dir).join("sales.txt");
            fs::write(&raw, payload).unwrap();
            materializer.materialize(&raw, report_date()).unwrap();
        }

        assert_eq!(fs::read(dir.path().join("sales.txt")).unwrap(), b"second");
    }

    #[test]
    fn missing_raw_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, false, None);
        let err = Materializer::new(&opts)
            .materialize(&dir.path().join("absent.txt.gz"), report_date())
            .unwrap_err();
        assert!(matches!(err, DownloaderError::IoError(_)));
    }
}
