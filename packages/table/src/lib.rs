#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Text tables built from listing records.
//!
//! A [`Table`] is a header row plus rows of text cells. Records enter
//! through [`Table::from_listings`], which coerces every field to text up
//! front, so rendering and export never reformat values. Tables can be
//! split on a column predicate ([`Table::partition`]), drawn for a terminal
//! ([`render`]), and serialised as BOM-prefixed UTF-8 CSV ([`export`]).

pub mod export;
pub mod render;

use travel_scrape_listing_models::Listing;

pub use export::{CSV_MIME, ExportedFile, UTF8_BOM};

/// Errors that can occur while building, splitting, or serialising tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// CSV serialisation or parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No column has the requested header.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A row did not have one cell per header.
    #[error("Row has {found} cell(s), expected {expected}")]
    Width {
        /// Number of headers.
        expected: usize,
        /// Number of cells in the offending row.
        found: usize,
    },
}

/// A header row plus rows of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// An empty table with the given headers.
    #[must_use]
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_owned()).collect(),
            rows: Vec::new(),
        }
    }

    /// Lays out `records` under `L::HEADERS`, one row per record.
    #[must_use]
    pub fn from_listings<L: Listing>(records: impl IntoIterator<Item = L>) -> Self {
        Self {
            headers: L::HEADERS.iter().map(|h| (*h).to_owned()).collect(),
            rows: records.into_iter().map(Listing::into_cells).collect(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Width`] if `row` does not have one cell per
    /// header.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.headers.len() {
            return Err(TableError::Width {
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column headed `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Splits rows by testing the `column` cell against `predicate`.
    ///
    /// Returns `(matching, rest)`. Both keep the original headers and row
    /// order, and every row lands in exactly one of them.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if no header is `column`.
    pub fn partition(
        self,
        column: &str,
        predicate: impl Fn(&str) -> bool,
    ) -> Result<(Self, Self), TableError> {
        let index = self
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_owned()))?;

        let (matching, rest): (Vec<_>, Vec<_>) = self
            .rows
            .into_iter()
            .partition(|row| predicate(&row[index]));

        log::debug!(
            "Partitioned on '{column}': {} matching, {} other",
            matching.len(),
            rest.len()
        );

        Ok((
            Self {
                headers: self.headers.clone(),
                rows: matching,
            },
            Self {
                headers: self.headers,
                rows: rest,
            },
        ))
    }
}

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
