//! Train listing assembly.
//!
//! Name and duration are flat queries. Times, stations, fares, and running
//! days live inside per-listing containers and are derived one container at
//! a time through the label conventions in [`crate::convention`]. Columns
//! are then padded with the sentinel to the longest one before zipping.

use travel_scrape_browser::{Dom, DomElement, wait_for_all};
use travel_scrape_listing_models::{AlignedColumns, FieldColumn, TrainRecord};

use crate::convention::{TimeCell, classify_running_days, join_prices};
use crate::extract::{extract_column, extract_within, positional_texts};
use crate::profile::TrainProfile;
use crate::{Assembly, ScrapeError};

struct TimeColumns {
    departure: Vec<String>,
    arrival: Vec<String>,
    source: Vec<String>,
    destination: Vec<String>,
}

impl TimeColumns {
    fn with_capacity(n: usize) -> Self {
        Self {
            departure: Vec::with_capacity(n),
            arrival: Vec::with_capacity(n),
            source: Vec::with_capacity(n),
            destination: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, cell: TimeCell) {
        self.departure.push(cell.departure);
        self.arrival.push(cell.arrival);
        self.source.push(cell.source);
        self.destination.push(cell.destination);
    }
}

async fn time_columns<D: Dom + ?Sized>(
    dom: &D,
    profile: &TrainProfile,
) -> Result<TimeColumns, ScrapeError> {
    let groups = dom.find_all(&profile.columns.time_group).await?;
    let mut columns = TimeColumns::with_capacity(groups.len());
    for group in &groups {
        let spans = group.find_all(&profile.columns.time_span).await?;
        let texts = positional_texts(&spans).await?;
        columns.push(profile.time_labels.parse(&texts));
    }
    Ok(columns)
}

async fn price_column<D: Dom + ?Sized>(
    dom: &D,
    profile: &TrainProfile,
) -> Result<FieldColumn, ScrapeError> {
    let groups = dom.find_all(&profile.columns.price_group).await?;
    let mut values = Vec::with_capacity(groups.len());
    for group in &groups {
        let entries = extract_within(group, &profile.columns.price_entry).await?;
        values.push(join_prices(&entries));
    }
    Ok(FieldColumn::new("prices", values))
}

async fn frequency_column<D: Dom + ?Sized>(
    dom: &D,
    profile: &TrainProfile,
) -> Result<FieldColumn, ScrapeError> {
    let groups = dom.find_all(&profile.columns.run_group).await?;
    let mut values = Vec::with_capacity(groups.len());
    for group in &groups {
        let days = extract_within(group, &profile.columns.run_day).await?;
        values.push(classify_running_days(&days));
    }
    Ok(FieldColumn::new("frequency", values))
}

/// Extracts every train listing currently rendered in `dom`.
///
/// # Errors
///
/// Returns [`ScrapeError::Browser`] if no train name appears within the
/// profile's ready bound or a query fails, and [`ScrapeError::Mismatch`] if
/// the columns are ragged under a `reject` policy.
pub async fn assemble_trains<D: Dom + ?Sized>(
    dom: &D,
    profile: &TrainProfile,
) -> Result<Assembly<TrainRecord>, ScrapeError> {
    wait_for_all(dom, &profile.ready, profile.ready_timeout()).await?;

    let name = extract_column(dom, "name", &profile.columns.name).await?;
    let duration = extract_column(dom, "duration", &profile.columns.duration).await?;
    let times = time_columns(dom, profile).await?;
    let prices = price_column(dom, profile).await?;
    let frequency = frequency_column(dom, profile).await?;

    let columns = [
        name,
        FieldColumn::new("departure", times.departure),
        FieldColumn::new("arrival", times.arrival),
        FieldColumn::new("source", times.source),
        duration,
        FieldColumn::new("destination", times.destination),
        prices,
        frequency,
    ];

    let alignment = AlignedColumns::new(columns).into_rows(profile.reconcile)?;
    let assembly = Assembly::from_alignment(alignment, TrainRecord::from_row);
    log::info!("Assembled {} train listing(s)", assembly.records.len());
    Ok(assembly)
}
