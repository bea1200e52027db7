//! Bounded explicit waits.
//!
//! Pages are handed back as soon as their DOM is parsed, so content that is
//! built by script has to be polled for.

use std::time::Duration;

use tokio::time::Instant;

use crate::{BrowserError, Dom, Locator};

/// How often a pending wait re-queries the DOM.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Polls `dom` until at least one element matches `locator`.
///
/// The DOM is always queried at least once, so a zero or very short timeout
/// acts as a presence check.
///
/// # Errors
///
/// Returns [`BrowserError::Timeout`] if nothing matched before `timeout`
/// elapsed, or any error raised by the query itself.
pub async fn wait_for_all<D: Dom + ?Sized>(
    dom: &D,
    locator: &Locator,
    timeout: Duration,
) -> Result<Vec<D::Element>, BrowserError> {
    let deadline = Instant::now() + timeout;

    loop {
        let found = dom.find_all(locator).await?;
        if !found.is_empty() {
            log::debug!("Found {} element(s) for {locator}", found.len());
            return Ok(found);
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(BrowserError::Timeout {
                what: locator.to_string(),
                waited: timeout,
            });
        }
        tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::StaticDocument;

    #[tokio::test(start_paused = true)]
    async fn returns_immediately_when_present() {
        let doc = StaticDocument::new("<span class=\"fare\">499</span>");
        let found = wait_for_all(&doc, &Locator::css("span.fare"), Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_absent() {
        let doc = StaticDocument::new("<div></div>");
        let started = Instant::now();
        let err = wait_for_all(&doc, &Locator::class("name"), Duration::from_secs(10))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(started.elapsed() >= Duration::from_secs(10));
    }
}
