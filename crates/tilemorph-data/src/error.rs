use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP source {url} requested but the `http` feature is disabled")]
    HttpDisabled { url: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("dataset has no header row")]
    MissingHeader,
}
