#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing extraction for bus and train search result pages.
//!
//! Works against any [`travel_scrape_browser::Dom`]: [`trigger`] opens
//! collapsed listings, [`extract`] reads field columns, and [`bus`] and
//! [`train`] assemble those columns into records. Everything site-specific
//! comes from a [`profile::SiteProfile`].
//!
//! This crate knows nothing about tables, files, or front ends. Callers get
//! an [`Assembly`] and decide what to do with it.

pub mod bus;
pub mod convention;
pub mod extract;
pub mod profile;
pub mod progress;
pub mod train;
pub mod trigger;

#[cfg(test)]
mod testing;

use travel_scrape_browser::BrowserError;
use travel_scrape_listing_models::columns::{describe_lengths, is_ragged};
use travel_scrape_listing_models::{Alignment, ColumnMismatch, ReconcilePolicy};

pub use bus::assemble_buses;
pub use profile::SiteProfile;
pub use train::assemble_trains;
pub use trigger::{Expansion, TriggerOutcome, expand_all};

/// Errors that can occur while extracting listings.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The browser or a DOM query failed, including expired waits.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// A site profile could not be parsed.
    #[error("Profile error: {0}")]
    Profile(#[from] toml::de::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No built-in profile has the requested id.
    #[error("Unknown site profile: {0}")]
    UnknownProfile(String),

    /// Ragged columns under a `reject` reconciliation policy.
    #[error(transparent)]
    Mismatch(#[from] ColumnMismatch),
}

/// Records assembled from one page, with the column diagnostics that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly<R> {
    /// Assembled records, in document order.
    pub records: Vec<R>,
    /// `(role, length)` of every extracted column before reconciliation.
    pub lengths: Vec<(String, usize)>,
    /// The policy applied to the columns.
    pub policy: ReconcilePolicy,
}

impl<R> Assembly<R> {
    /// Builds records from every zipped row of `alignment`.
    pub fn from_alignment<const N: usize>(
        alignment: Alignment<N>,
        to_record: impl Fn([String; N]) -> R,
    ) -> Self {
        Self {
            records: alignment.rows.into_iter().map(to_record).collect(),
            lengths: alignment.lengths,
            policy: alignment.policy,
        }
    }

    /// Whether the source columns had different lengths.
    #[must_use]
    pub fn is_ragged(&self) -> bool {
        is_ragged(&self.lengths)
    }

    /// Human-readable column lengths, e.g. `"name=3, fare=2"`.
    #[must_use]
    pub fn describe_lengths(&self) -> String {
        describe_lengths(&self.lengths)
    }

    /// Whether nothing was assembled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
