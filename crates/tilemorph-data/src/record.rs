#![forbid(unsafe_code)]

//! Records and datasets.

use std::sync::Arc;

use serde::Serialize;

/// Column holding the short label shown in the tile corner.
pub const FIELD_LABEL: &str = "Country";
/// Column holding the image reference.
pub const FIELD_IMAGE: &str = "Photo";
/// Column holding the tile title.
pub const FIELD_TITLE: &str = "Name";
/// Column holding the descriptive line under the title.
pub const FIELD_DETAIL: &str = "Interest";

/// One data row. Values are looked up by header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    #[must_use]
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Build a record from `(column, value)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (headers, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .unzip();
        Self::new(headers.into(), values)
    }

    /// Value of column `name`. A column missing from this row reads as `""`;
    /// an unknown column is `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.values.get(idx).map_or("", String::as_str))
    }

    fn field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.field(FIELD_LABEL)
    }

    #[must_use]
    pub fn image(&self) -> &str {
        self.field(FIELD_IMAGE)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.field(FIELD_TITLE)
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        self.field(FIELD_DETAIL)
    }

    /// `(column, value)` pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), self.values.get(i).map_or("", String::as_str)))
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (k, v) in self.fields() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// An ordered collection of records sharing one header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(headers: Arc<[String]>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
