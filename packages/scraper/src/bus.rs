//! Bus listing assembly.
//!
//! Every bus column is a flat document-order query. The eight columns are
//! zipped by position under the profile's [`ReconcilePolicy`], which is
//! `truncate` for the built-in profile, so the record count equals the
//! shortest column.
//!
//! [`ReconcilePolicy`]: travel_scrape_listing_models::ReconcilePolicy

use travel_scrape_browser::{Dom, wait_for_all};
use travel_scrape_listing_models::{AlignedColumns, BusRecord};

use crate::extract::extract_column;
use crate::profile::BusProfile;
use crate::{Assembly, ScrapeError};

/// Extracts every bus listing currently rendered in `dom`.
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if no fare appears within the profile's
/// ready bound or a query fails, and [`ScrapeError::Mismatch`] if the
/// columns are ragged under a `reject` policy.
pub async fn assemble_buses<D: Dom + ?Sized>(
    dom: &D,
    profile: &BusProfile,
) -> Result<Assembly<BusRecord>, ScrapeError> {
    wait_for_all(dom, &profile.ready, profile.ready_timeout()).await?;

    let c = &profile.columns;
    let columns = [
        extract_column(dom, "name", &c.name).await?,
        extract_column(dom, "bus_type", &c.bus_type).await?,
        extract_column(dom, "departure", &c.departure).await?,
        extract_column(dom, "arrival", &c.arrival).await?,
        extract_column(dom, "source", &c.source).await?,
        extract_column(dom, "duration", &c.duration).await?,
        extract_column(dom, "destination", &c.destination).await?,
        extract_column(dom, "fare", &c.fare).await?,
    ];

    let alignment = AlignedColumns::new(columns).into_rows(profile.reconcile)?;
    let assembly = Assembly::from_alignment(alignment, BusRecord::from_row);
    log::info!("Assembled {} bus listing(s)", assembly.records.len());
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SiteProfile;
    use travel_scrape_browser::snapshot::StaticDocument;
    use travel_scrape_listing_models::ReconcilePolicy;

    fn listing(name: &str, fare: &str) -> String {
        format!(
            r#"<div class="bus">
                 <p class="title">{name}</p>
                 <p class="sub-title">AC Sleeper (2+1)</p>
                 <span class="departure-time">21:30</span>
                 <span class="arrival-time">06:15</span>
                 <span class="source-name">Ameerpet</span>
                 <span class="travel-time">8h 45m</span>
                 <span class="destination-name">Vijayawada</span>
                 <span class="fare">{fare}</span>
               </div>"#
        )
    }

    fn profile() -> BusProfile {
        SiteProfile::default_profile().unwrap().bus
    }

    #[tokio::test(start_paused = true)]
    async fn assembles_one_record_per_listing() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            listing("APSRTC Service Number 4021", "₹ 612"),
            listing("Orange Travels", "₹ 899")
        );
        let assembly = assemble_buses(&StaticDocument::new(&html), &profile())
            .await
            .unwrap();

        assert_eq!(assembly.records.len(), 2);
        assert!(!assembly.is_ragged());
        let first = &assembly.records[0];
        assert_eq!(first.name, "APSRTC Service Number 4021");
        assert_eq!(first.bus_type, "AC Sleeper (2+1)");
        assert_eq!(first.source, "Ameerpet");
        assert_eq!(first.destination, "Vijayawada");
        assert_eq!(first.fare, "₹ 612");
        assert_eq!(assembly.records[1].fare, "₹ 899");
    }

    #[tokio::test(start_paused = true)]
    async fn record_count_is_the_shortest_column() {
        let html = format!(
            r#"<html><body>{}{}<p class="title">Dangling Title</p></body></html>"#,
            listing("A", "100"),
            listing("B", "200")
        );
        let assembly = assemble_buses(&StaticDocument::new(&html), &profile())
            .await
            .unwrap();

        assert_eq!(assembly.records.len(), 2);
        assert!(assembly.is_ragged());
        let shortest = assembly.lengths.iter().map(|(_, n)| *n).min().unwrap();
        assert_eq!(assembly.records.len(), shortest);
        assert_eq!(
            assembly.lengths.iter().find(|(role, _)| role == "name").unwrap().1,
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn blank_fields_shift_the_column() {
        let html = format!(
            r#"<html><body>{}<div><p class="title">  </p><span class="fare">50</span></div></body></html>"#,
            listing("Only", "100")
        );
        let assembly = assemble_buses(&StaticDocument::new(&html), &profile())
            .await
            .unwrap();
        assert_eq!(assembly.records.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_fares_time_out_quickly() {
        let doc = StaticDocument::new(r#"<p class="title">Nothing priced</p>"#);
        let started = tokio::time::Instant::now();
        let err = assemble_buses(&doc, &profile()).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Browser(ref e) if e.is_timeout()));
        assert!(started.elapsed() < std::time::Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn reject_policy_refuses_ragged_columns() {
        let html = format!(
            r#"<html><body>{}<span class="fare">1</span></body></html>"#,
            listing("A", "100")
        );
        let mut profile = profile();
        profile.reconcile = ReconcilePolicy::Reject;
        let err = assemble_buses(&StaticDocument::new(&html), &profile)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Mismatch(_)));
    }
}
