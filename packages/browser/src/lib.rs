#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Browser sessions and the DOM query contract.
//!
//! Extraction code never talks to a browser engine directly. It is written
//! against the [`Dom`] and [`DomElement`] traits, and sessions are obtained
//! from a [`Launcher`]. Two backends are provided:
//!
//! * [`chromium`] drives a headless Chromium over CDP (via `chromiumoxide`)
//!   for live, JavaScript-rendered pages.
//! * [`snapshot`] serves a saved HTML page parsed with `scraper`, for
//!   offline runs and tests.

pub mod chromium;
pub mod config;
pub mod locator;
pub mod snapshot;
pub mod wait;

use std::future::Future;
use std::time::Duration;

pub use config::{PageLoad, SessionConfig};
pub use locator::Locator;
pub use wait::wait_for_all;

/// Errors raised by browser sessions and DOM queries.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// The browser engine could not be located, configured, or started.
    #[error("Browser launch failed: {0}")]
    Launch(String),

    /// A DevTools protocol command failed.
    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// Navigation was rejected by the browser.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// The URL that was being loaded.
        url: String,
        /// Reason reported by the browser.
        message: String,
    },

    /// A bounded wait expired.
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout {
        /// What was being waited for.
        what: String,
        /// How long the wait lasted.
        waited: Duration,
    },

    /// A locator could not be compiled to a CSS selector.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// A script executed in the page threw or returned garbage.
    #[error("Script error: {0}")]
    Script(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Whether this error is an expired bounded wait.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A handle to one element of the rendered page.
pub trait DomElement: Send + Sync + Sized {
    /// Rendered text of the element (untrimmed).
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the element is stale or the text cannot
    /// be read.
    fn text(&self) -> impl Future<Output = Result<String, BrowserError>> + Send;

    /// All descendants of this element matching `locator`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the query fails.
    fn find_all(
        &self,
        locator: &Locator,
    ) -> impl Future<Output = Result<Vec<Self>, BrowserError>> + Send;

    /// Scrolls the element into view, aligned to the top of the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the script cannot run on the element.
    fn scroll_into_view(&self) -> impl Future<Output = Result<(), BrowserError>> + Send;

    /// Invokes the element's `click()` through script rather than a
    /// synthesized pointer event.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the script throws or the element is stale.
    fn click(&self) -> impl Future<Output = Result<(), BrowserError>> + Send;
}

/// A queryable page.
pub trait Dom: Send + Sync {
    /// Element handle type produced by queries.
    type Element: DomElement;

    /// All elements matching `locator`, in document order.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the query itself fails.
    fn find_all(
        &self,
        locator: &Locator,
    ) -> impl Future<Output = Result<Vec<Self::Element>, BrowserError>> + Send;
}

/// An exclusively owned browser session pointed at one page.
pub trait Session: Dom + Sized {
    /// Loads `url` into the session's page.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if navigation fails or times out.
    fn navigate(&mut self, url: &str) -> impl Future<Output = Result<(), BrowserError>> + Send;

    /// Tears the session down, releasing the underlying engine.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the engine does not shut down cleanly.
    fn close(self) -> impl Future<Output = Result<(), BrowserError>> + Send;
}

/// Creates browser sessions.
pub trait Launcher: Send + Sync {
    /// Session type produced by this launcher.
    type Session: Session;

    /// Starts a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Launch`] if the engine cannot be started.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, BrowserError>> + Send;
}
