#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing data model shared by the extraction and tabulation crates.
//!
//! A scrape produces one [`FieldColumn`] per locator query. Columns are
//! zipped positionally through [`AlignedColumns`] into fixed-arity records
//! ([`BusRecord`], [`TrainRecord`]) which all expose their cells through the
//! [`Listing`] trait.

pub mod columns;

use strum_macros::{AsRefStr, Display, EnumString};

pub use columns::{AlignedColumns, Alignment, ColumnMismatch, FieldColumn, ReconcilePolicy};

/// Placeholder for a field that is missing or could not be extracted.
pub const SENTINEL: &str = "N/A";

/// Which kind of travel listing page is being scraped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ListingKind {
    /// Bus search results.
    Bus,
    /// Train search results.
    Train,
}

impl ListingKind {
    /// Capitalised label for user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bus => "Bus",
            Self::Train => "Train",
        }
    }
}

/// A fixed-arity record that can be laid out as a table row.
pub trait Listing {
    /// Column headers, in cell order.
    const HEADERS: &'static [&'static str];

    /// Consumes the record, returning its cells in [`Self::HEADERS`] order.
    fn into_cells(self) -> Vec<String>;
}

/// One bus service row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRecord {
    /// Operator/service title, e.g. `"APSRTC Service Number 1234"`.
    pub name: String,
    /// Coach type, e.g. `"AC Sleeper (2+1)"`.
    pub bus_type: String,
    pub departure: String,
    pub arrival: String,
    /// Boarding place.
    pub source: String,
    pub duration: String,
    /// Dropping place.
    pub destination: String,
    pub fare: String,
}

impl BusRecord {
    /// Builds a record from a zipped row in [`BusRecord::HEADERS`] order.
    #[must_use]
    pub fn from_row(row: [String; 8]) -> Self {
        let [
            name,
            bus_type,
            departure,
            arrival,
            source,
            duration,
            destination,
            fare,
        ] = row;
        Self {
            name,
            bus_type,
            departure,
            arrival,
            source,
            duration,
            destination,
            fare,
        }
    }
}

impl Listing for BusRecord {
    const HEADERS: &'static [&'static str] = &[
        "Bus Name",
        "Bus Type",
        "Departure",
        "Arrival",
        "Starting Place",
        "Duration",
        "Ending Place",
        "Price",
    ];

    fn into_cells(self) -> Vec<String> {
        vec![
            self.name,
            self.bus_type,
            self.departure,
            self.arrival,
            self.source,
            self.duration,
            self.destination,
            self.fare,
        ]
    }
}

/// One train service row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRecord {
    pub name: String,
    /// `HH:MM` departure time.
    pub departure: String,
    /// `HH:MM` arrival time.
    pub arrival: String,
    /// Starting station.
    pub source: String,
    pub duration: String,
    /// Destination station.
    pub destination: String,
    /// Fare classes joined with `"; "`.
    pub prices: String,
    /// `"Runs Daily"` or the running-day tokens joined with `", "`.
    pub frequency: String,
}

impl TrainRecord {
    /// Builds a record from a zipped row in [`TrainRecord::HEADERS`] order.
    #[must_use]
    pub fn from_row(row: [String; 8]) -> Self {
        let [
            name,
            departure,
            arrival,
            source,
            duration,
            destination,
            prices,
            frequency,
        ] = row;
        Self {
            name,
            departure,
            arrival,
            source,
            duration,
            destination,
            prices,
            frequency,
        }
    }
}

impl Listing for TrainRecord {
    const HEADERS: &'static [&'static str] = &[
        "Train Name",
        "Departure",
        "Arrival",
        "Starting Station",
        "Duration",
        "Destination Station",
        "Prices",
        "Frequency",
    ];

    fn into_cells(self) -> Vec<String> {
        vec![
            self.name,
            self.departure,
            self.arrival,
            self.source,
            self.duration,
            self.destination,
            self.prices,
            self.frequency,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(prefix: &str) -> [String; 8] {
        std::array::from_fn(|i| format!("{prefix}{i}"))
    }

    #[test]
    fn bus_cells_follow_header_order() {
        let record = BusRecord::from_row(row("b"));
        assert_eq!(record.fare, "b7");
        let cells = record.into_cells();
        assert_eq!(cells.len(), BusRecord::HEADERS.len());
        assert_eq!(cells[0], "b0");
        assert_eq!(cells[4], "b4");
    }

    #[test]
    fn train_cells_follow_header_order() {
        let record = TrainRecord::from_row(row("t"));
        assert_eq!(record.source, "t3");
        assert_eq!(record.frequency, "t7");
        assert_eq!(record.into_cells().len(), TrainRecord::HEADERS.len());
    }

    #[test]
    fn listing_kind_round_trips_through_strum() {
        assert_eq!("train".parse::<ListingKind>().unwrap(), ListingKind::Train);
        assert_eq!(ListingKind::Bus.to_string(), "bus");
        assert_eq!(ListingKind::Bus.label(), "Bus");
    }
}
