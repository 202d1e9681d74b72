#![forbid(unsafe_code)]

//! Data sources that yield a [`Dataset`] before the scene starts.

use std::path::PathBuf;

use url::Url;

use crate::csv;
use crate::error::{DataError, Result};
use crate::record::Dataset;

/// Supplies the records a scene is built from.
pub trait DataSource {
    /// Load the full dataset. Called once, before any tile exists.
    fn load(&mut self) -> Result<Dataset>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// CSV already held in memory.
#[derive(Debug, Clone)]
pub struct CsvText(pub String);

impl DataSource for CsvText {
    fn load(&mut self) -> Result<Dataset> {
        csv::parse(&self.0)
    }

    fn describe(&self) -> String {
        format!("inline CSV ({} bytes)", self.0.len())
    }
}

/// CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for CsvFile {
    fn load(&mut self) -> Result<Dataset> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| DataError::Read {
            path: self.path.clone(),
            source,
        })?;
        csv::parse(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV export downloaded over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpCsv {
    url: String,
}

impl HttpCsv {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DataSource for HttpCsv {
    #[cfg(feature = "http")]
    fn load(&mut self) -> Result<Dataset> {
        tracing::info!(target: "tilemorph.data", url = %self.url, "fetching CSV export");
        let text = reqwest::blocking::get(&self.url)?
            .error_for_status()?
            .text()?;
        csv::parse(&text)
    }

    #[cfg(not(feature = "http"))]
    fn load(&mut self) -> Result<Dataset> {
        Err(DataError::HttpDisabled {
            url: self.url.clone(),
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV export URL for one sheet of a published spreadsheet.
pub fn sheet_csv_url(spreadsheet_id: &str, sheet_name: &str) -> Result<String> {
    let base = format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}/gviz/tq");
    let url = Url::parse_with_params(&base, [("tqx", "out:csv"), ("sheet", sheet_name)])?;
    Ok(url.into())
}

/// Pick a source from a location string: `http://` and `https://` URLs are
/// downloaded, anything else is read as a file path.
#[must_use]
pub fn open(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCsv::new(location))
    } else {
        Box::new(CsvFile::new(location))
    }
}
