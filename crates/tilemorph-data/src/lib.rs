#![forbid(unsafe_code)]

//! Record ingestion for tilemorph.
//!
//! The scene only needs the number of records and a few text fields per
//! record. This crate gets them from inline CSV, a CSV file, or (with the
//! `http` feature) a published spreadsheet export.

pub mod csv;
pub mod error;
pub mod record;
pub mod source;

pub use error::{DataError, Result};
pub use record::{Dataset, Record};
pub use source::{CsvFile, CsvText, DataSource, HttpCsv, open, sheet_csv_url};
