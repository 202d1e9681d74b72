#![forbid(unsafe_code)]

//! Minimal CSV reader for spreadsheet exports.
//!
//! Handles the subset that spreadsheet CSV exports produce: comma
//! separators, optionally double-quoted fields, `""` as an escaped quote
//! inside a quoted field, and `\r\n` line endings. Quoted fields may not span
//! lines.
//!
//! # Failure Modes
//!
//! - Unterminated quote: the field runs to the end of the line.
//! - Short rows: missing trailing fields read as empty strings.
//! - Long rows: extra fields are ignored (logged at debug).

use std::sync::Arc;

use crate::error::{DataError, Result};
use crate::record::{Dataset, Record};

/// Split one CSV line into unquoted field values.
#[must_use]
pub fn split_line(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse CSV text into a [`Dataset`].
///
/// The first non-blank line is the header; every following non-blank line is
/// one record.
pub fn parse(text: &str) -> Result<Dataset> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or(DataError::MissingHeader)?;
    let headers: Arc<[String]> = split_line(header)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row, line) in lines.enumerate() {
        let values = split_line(line);
        if values.len() > headers.len() {
            tracing::debug!(
                target: "tilemorph.data",
                row,
                fields = values.len(),
                columns = headers.len(),
                "row has more fields than header; extras ignored"
            );
        }
        records.push(Record::new(Arc::clone(&headers), values));
    }

    tracing::debug!(
        target: "tilemorph.data",
        columns = headers.len(),
        records = records.len(),
        "parsed CSV dataset"
    );
    Ok(Dataset::new(headers, records))
}
