#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One scrape invocation, from URL to downloadable tables.
//!
//! [`scrape_buses`] and [`scrape_trains`] own a browser session for the
//! length of one call, run the extraction crates against it, and hand the
//! results to a [`Frontend`]. Every failure is turned into a front-end
//! message; nothing here panics or returns an error to the host.

pub mod frontend;
pub mod invocation;

use std::time::Duration;

use travel_scrape_browser::BrowserError;
use travel_scrape_scraper::ScrapeError;
use travel_scrape_table::TableError;

pub use frontend::Frontend;
pub use invocation::{accept_url, scrape_buses, scrape_trains};

/// Errors that end an invocation early.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The browser could not be started.
    #[error("Failed to start browser: {0}")]
    Setup(#[source] BrowserError),

    /// The page could not be loaded.
    #[error("Failed to load {url}: {source}")]
    Load {
        url: String,
        #[source]
        source: BrowserError,
    },

    /// Listing extraction failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// Building or exporting a table failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The front end could not accept a download.
    #[error("Failed to save {filename}: {source}")]
    Download {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a completed invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Listings assembled from the page.
    pub listings: usize,
    /// Files offered for download, in order.
    pub files: Vec<String>,
    /// Wall time from launch to session close.
    pub elapsed: Duration,
}

/// How an invocation ended.
#[derive(Debug)]
pub enum Outcome {
    /// The URL was empty; nothing was launched.
    Skipped,
    /// Setup, navigation, or export failed.
    Failed(PipelineError),
    /// The page yielded no listings.
    NoData,
    /// Tables were displayed and offered for download.
    Completed(ScrapeSummary),
}

impl Outcome {
    /// The summary of a completed invocation.
    #[must_use]
    pub const fn summary(&self) -> Option<&ScrapeSummary> {
        match self {
            Self::Completed(summary) => Some(summary),
            Self::Skipped | Self::Failed(_) | Self::NoData => None,
        }
    }
}
