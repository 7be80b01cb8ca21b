use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloaderError {
    #[error("invalid report date {0:?}: expected mm/dd/yyyy")]
    InvalidDateFormat(String),

    #[error("file name format {0:?} cannot be rendered")]
    InvalidFilenameFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
