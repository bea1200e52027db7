//! Best-effort activation of controls that gate hidden listings.
//!
//! Each control is scrolled into view, given a moment to settle, and
//! clicked through script. Controls are handled independently: one failing
//! (stale, already expanded, detached) never stops the rest. The outcome of
//! every attempt is returned so callers and tests can see partial failure.

use travel_scrape_browser::{Dom, DomElement, wait_for_all};

use crate::profile::ExpandProfile;

/// Result of activating one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    /// Zero-based position of the control in document order.
    pub index: usize,
    /// `Err` carries the failure message.
    pub result: Result<(), String>,
}

/// What the expansion step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// No control appeared within the wait bound. A valid page state.
    NoControls,
    /// Locating controls failed; the page was left untouched.
    LocateFailed(String),
    /// Every located control was attempted.
    Attempted(Vec<TriggerOutcome>),
}

impl Expansion {
    /// Number of controls clicked successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        match self {
            Self::Attempted(outcomes) => outcomes.iter().filter(|o| o.result.is_ok()).count(),
            Self::NoControls | Self::LocateFailed(_) => 0,
        }
    }

    /// Number of controls whose activation failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        match self {
            Self::Attempted(outcomes) => outcomes.iter().filter(|o| o.result.is_err()).count(),
            Self::NoControls | Self::LocateFailed(_) => 0,
        }
    }
}

async fn activate<E: DomElement>(control: &E, settle: std::time::Duration) -> Result<(), String> {
    control
        .scroll_into_view()
        .await
        .map_err(|e| format!("scroll failed: {e}"))?;
    tokio::time::sleep(settle).await;
    control
        .click()
        .await
        .map_err(|e| format!("click failed: {e}"))
}

/// Activates every control matching `profile.controls`.
///
/// Never fails: absence of controls and location errors are reported
/// through [`Expansion`] and logged, and extraction proceeds either way.
pub async fn expand_all<D: Dom + ?Sized>(dom: &D, profile: &ExpandProfile) -> Expansion {
    let controls = match wait_for_all(dom, &profile.controls, profile.locate_timeout()).await {
        Ok(controls) => controls,
        Err(e) if e.is_timeout() => {
            log::info!("No expandable controls found for {}", profile.controls);
            return Expansion::NoControls;
        }
        Err(e) => {
            log::warn!("Error locating expandable controls: {e}");
            return Expansion::LocateFailed(e.to_string());
        }
    };

    log::info!("Found {} expandable control(s)", controls.len());

    let mut outcomes = Vec::with_capacity(controls.len());
    for (index, control) in controls.iter().enumerate() {
        let result = activate(control, profile.settle()).await;
        match &result {
            Ok(()) => log::info!("Expanded control #{}", index + 1),
            Err(e) => log::warn!("Failed to expand control #{}: {e}", index + 1),
        }
        outcomes.push(TriggerOutcome { index, result });
    }

    Expansion::Attempted(outcomes)
}
