//! Config-driven site profiles.
//!
//! A [`SiteProfile`] captures everything site-specific about a listing page
//! (locators, wait bounds, reconciliation policies, output names) in a TOML
//! document. The built-in profile is baked into the binary at compile time
//! via [`include_str!`]; a file on disk can replace it.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use travel_scrape_browser::{Locator, SessionConfig};
use travel_scrape_listing_models::ReconcilePolicy;

use crate::ScrapeError;
use crate::convention::TimeLabelConvention;

/// Profiles embedded at compile time.
const BUILTIN_PROFILES: &[(&str, &str)] = &[("abhibus", include_str!("../profiles/abhibus.toml"))];

/// A complete, named extraction convention for one travel site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteProfile {
    /// Unique identifier (e.g. `"abhibus"`).
    pub id: String,
    /// Human-readable site name.
    pub name: String,
    /// Version tag of the locator and label conventions.
    pub convention: String,
    /// Browser launch settings.
    #[serde(default)]
    pub browser: SessionConfig,
    pub bus: BusProfile,
    pub train: TrainProfile,
}

impl SiteProfile {
    /// Parses a profile from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Profile`] if the TOML is malformed or missing
    /// required fields.
    pub fn from_toml(text: &str) -> Result<Self, ScrapeError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a profile file.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ScrapeError> {
        let text = std::fs::read_to_string(path)?;
        let profile = Self::from_toml(&text)?;
        log::info!(
            "Loaded profile '{}' ({}) from {}",
            profile.id,
            profile.convention,
            path.display()
        );
        Ok(profile)
    }

    /// Looks up a built-in profile by id.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::UnknownProfile`] if no built-in profile has
    /// that id, or [`ScrapeError::Profile`] if the embedded TOML is invalid.
    pub fn builtin(id: &str) -> Result<Self, ScrapeError> {
        let (_, text) = BUILTIN_PROFILES
            .iter()
            .find(|(name, _)| *name == id)
            .ok_or_else(|| ScrapeError::UnknownProfile(id.to_owned()))?;
        Self::from_toml(text)
    }

    /// The default built-in profile.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Profile`] if the embedded TOML is invalid.
    pub fn default_profile() -> Result<Self, ScrapeError> {
        Self::builtin(BUILTIN_PROFILES[0].0)
    }
}

/// Controls that must be activated to reveal hidden listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpandProfile {
    pub controls: Locator,
    /// Upper bound on waiting for the first control to appear.
    pub locate_timeout_ms: u64,
    /// Pause between scrolling a control into view and clicking it.
    pub settle_ms: u64,
}

impl ExpandProfile {
    #[must_use]
    pub const fn locate_timeout(&self) -> Duration {
        Duration::from_millis(self.locate_timeout_ms)
    }

    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Where a rendered table is shown and saved.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
    /// Heading shown above the table.
    pub title: String,
    /// Download filename.
    pub filename: String,
}

/// Case-insensitive substring split of a table on one column.
#[derive(Debug, Clone, Deserialize)]
pub struct PartitionRule {
    /// Header of the column tested.
    pub column: String,
    /// Text whose presence (ignoring case) puts a row in `matching`.
    pub needle: String,
    pub matching: OutputSpec,
    pub rest: OutputSpec,
}

/// Locators for the eight bus columns.
#[derive(Debug, Clone, Deserialize)]
pub struct BusColumns {
    pub name: Locator,
    pub bus_type: Locator,
    pub departure: Locator,
    pub arrival: Locator,
    pub source: Locator,
    pub duration: Locator,
    pub destination: Locator,
    pub fare: Locator,
}

/// Bus listing extraction settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BusProfile {
    /// Element whose presence signals that listings have rendered.
    pub ready: Locator,
    pub ready_timeout_ms: u64,
    #[serde(default)]
    pub reconcile: ReconcilePolicy,
    /// Expandable rows to open before extraction, if the site has any.
    pub expand: Option<ExpandProfile>,
    pub columns: BusColumns,
    pub partition: PartitionRule,
}

impl BusProfile {
    #[must_use]
    pub const fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }
}

/// Locators for train columns and their grouped containers.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainColumns {
    pub name: Locator,
    pub duration: Locator,
    /// One container per listing holding the time/station label spans.
    pub time_group: Locator,
    /// Label spans inside a `time_group` container.
    pub time_span: Locator,
    /// One container per listing holding its fare classes.
    pub price_group: Locator,
    pub price_entry: Locator,
    /// One container per listing holding its days-of-run markers.
    pub run_group: Locator,
    /// Markers inside a `run_group` container for days the service runs.
    pub run_day: Locator,
}

/// Train listing extraction settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainProfile {
    pub ready: Locator,
    pub ready_timeout_ms: u64,
    #[serde(default = "default_train_reconcile")]
    pub reconcile: ReconcilePolicy,
    pub time_labels: TimeLabelConvention,
    pub columns: TrainColumns,
    pub output: OutputSpec,
}

const fn default_train_reconcile() -> ReconcilePolicy {
    ReconcilePolicy::Pad
}

impl TrainProfile {
    #[must_use]
    pub const fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_scrape_browser::PageLoad;

    #[test]
    fn builtin_profile_parses() {
        let profile = SiteProfile::default_profile().unwrap();
        assert_eq!(profile.id, "abhibus");
        assert_eq!(profile.browser.page_load, PageLoad::Eager);
        assert_eq!(profile.bus.reconcile, ReconcilePolicy::Truncate);
        assert_eq!(profile.train.reconcile, ReconcilePolicy::Pad);
        assert_eq!(profile.bus.ready, Locator::css("span.fare"));
        assert_eq!(profile.bus.ready_timeout(), Duration::from_millis(100));
        assert_eq!(profile.train.ready_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn builtin_profile_names_the_three_output_files() {
        let profile = SiteProfile::default_profile().unwrap();
        assert_eq!(
            profile.bus.partition.matching.filename,
            "government_buses_sorted.csv"
        );
        assert_eq!(
            profile.bus.partition.rest.filename,
            "private_buses_sorted.csv"
        );
        assert_eq!(profile.train.output.filename, "train_details.csv");
    }

    #[test]
    fn expand_bounds_are_short() {
        let profile = SiteProfile::default_profile().unwrap();
        let expand = profile.bus.expand.unwrap();
        assert!(expand.locate_timeout() <= Duration::from_secs(2));
        assert_eq!(expand.settle(), Duration::from_secs(1));
    }

    #[test]
    fn unknown_builtin_is_rejected() {
        let err = SiteProfile::builtin("redbus").unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownProfile(id) if id == "redbus"));
    }

    #[test]
    fn malformed_toml_is_a_profile_error() {
        let err = SiteProfile::from_toml("id = \"x\"").unwrap_err();
        assert!(matches!(err, ScrapeError::Profile(_)));
    }
}
