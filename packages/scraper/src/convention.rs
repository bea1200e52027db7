//! Label conventions for train listings.
//!
//! Train rows render their times, stations, fares, and running days as
//! loose text inside grouped containers. The functions here turn that text
//! into field values. They are tied to the exact markup of the site and are
//! the single place to change when it moves.

use serde::Deserialize;
use travel_scrape_listing_models::SENTINEL;

/// Frequency reported when every day of the week is marked as running.
pub const RUNS_DAILY: &str = "Runs Daily";

/// Separator between fare classes. Not a comma so the joined value stays a
/// single unquoted-friendly CSV cell.
pub const PRICE_SEPARATOR: &str = "; ";

/// Separator between running-day tokens.
pub const DAY_SEPARATOR: &str = ", ";

/// Versioned layout of the time/station label spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLabelConvention {
    /// Each endpoint span reads `"HH:MM <station>"`, e.g.
    /// `"05:45 Secunderabad Jn"`. The departure endpoint is the first span
    /// and the arrival endpoint is the second-to-last (the last span holds
    /// the arrival date).
    #[default]
    HhmmPrefixedV1,
}

/// Fields derived from one listing's time container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeCell {
    pub departure: String,
    pub arrival: String,
    pub source: String,
    pub destination: String,
}

impl TimeCell {
    fn missing() -> Self {
        Self {
            departure: SENTINEL.to_owned(),
            arrival: SENTINEL.to_owned(),
            source: SENTINEL.to_owned(),
            destination: SENTINEL.to_owned(),
        }
    }
}

/// Length of the `HH:MM` prefix.
const TIME_LEN: usize = 5;
/// Characters before the station name (`HH:MM` plus one space).
const STATION_OFFSET: usize = 6;

fn head(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

fn after(text: &str, skip: usize) -> Option<String> {
    (text.chars().count() > skip).then(|| text.chars().skip(skip).collect())
}

impl TimeLabelConvention {
    /// Derives departure, arrival, source, and destination from the trimmed
    /// texts of a container's spans, in document order.
    ///
    /// Positions that are absent, and texts too short to hold the expected
    /// part, yield [`SENTINEL`].
    #[must_use]
    pub fn parse(self, spans: &[String]) -> TimeCell {
        match self {
            Self::HhmmPrefixedV1 => parse_hhmm_prefixed(spans),
        }
    }
}

fn parse_hhmm_prefixed(spans: &[String]) -> TimeCell {
    let Some(first) = spans.first() else {
        return TimeCell::missing();
    };
    let second_last = spans.len().checked_sub(2).map(|i| spans[i].as_str());

    let departure = if first.is_empty() {
        SENTINEL.to_owned()
    } else {
        head(first, TIME_LEN)
    };

    let arrival = match second_last {
        Some(text) if text.chars().count() > 1 => head(text, TIME_LEN),
        _ => SENTINEL.to_owned(),
    };

    let source = if spans.len() > 2 {
        after(first, STATION_OFFSET)
    } else {
        None
    };

    let destination = if spans.len() > 3 {
        second_last.and_then(|text| after(text, STATION_OFFSET))
    } else {
        None
    };

    TimeCell {
        departure,
        arrival,
        source: source.unwrap_or_else(|| SENTINEL.to_owned()),
        destination: destination.unwrap_or_else(|| SENTINEL.to_owned()),
    }
}

/// Joins a listing's fare classes, or [`SENTINEL`] when it has none.
#[must_use]
pub fn join_prices(entries: &[String]) -> String {
    let prices: Vec<&str> = entries
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if prices.is_empty() {
        SENTINEL.to_owned()
    } else {
        prices.join(PRICE_SEPARATOR)
    }
}

/// Summarises the running-day markers of one listing.
///
/// Day markers are single-letter abbreviations, so Tuesday/Thursday and
/// Saturday/Sunday collide on `"T"` and `"S"`. Exactly two of each is read
/// as a service running every day. Otherwise the distinct markers are
/// listed in order of first appearance.
#[must_use]
pub fn classify_running_days(days: &[String]) -> String {
    if days.is_empty() {
        return SENTINEL.to_owned();
    }
    let count = |token: &str| days.iter().filter(|d| *d == token).count();
    if count("T") == 2 && count("S") == 2 {
        return RUNS_DAILY.to_owned();
    }
    let mut distinct: Vec<&str> = Vec::with_capacity(days.len());
    for day in days {
        if !distinct.contains(&day.as_str()) {
            distinct.push(day);
        }
    }
    distinct.join(DAY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn full_container_yields_all_four_fields() {
        let spans = strings(&["05:45 Secunderabad Jn", "8h 10m", "13:55 Tirupati", "Tue, 14 Oct"]);
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&spans);
        assert_eq!(cell.departure, "05:45");
        assert_eq!(cell.source, "Secunderabad Jn");
        assert_eq!(cell.arrival, "13:55");
        assert_eq!(cell.destination, "Tirupati");
    }

    #[test]
    fn single_span_only_yields_departure() {
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&strings(&["21:10 Kacheguda"]));
        assert_eq!(cell.departure, "21:10");
        assert_eq!(cell.arrival, SENTINEL);
        assert_eq!(cell.source, SENTINEL);
        assert_eq!(cell.destination, SENTINEL);
    }

    #[test]
    fn empty_container_yields_sentinels() {
        assert_eq!(
            TimeLabelConvention::HhmmPrefixedV1.parse(&[]),
            TimeCell::missing()
        );
    }

    #[test]
    fn three_spans_yield_source_but_not_destination() {
        let spans = strings(&["06:00 Vijayawada", "11:30 Guntur", "Wed"]);
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&spans);
        assert_eq!(cell.source, "Vijayawada");
        assert_eq!(cell.arrival, "11:30");
        assert_eq!(cell.destination, SENTINEL);
    }

    #[test]
    fn short_label_yields_sentinel_station() {
        let spans = strings(&["06:00", "x", "07:15", "Thu"]);
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&spans);
        assert_eq!(cell.departure, "06:00");
        assert_eq!(cell.source, SENTINEL);
        assert_eq!(cell.destination, SENTINEL);
    }

    #[test]
    fn one_character_arrival_is_missing() {
        let spans = strings(&["06:00 Nellore", "-", "Fri"]);
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&spans);
        assert_eq!(cell.arrival, SENTINEL);
    }

    #[test]
    fn empty_first_span_has_no_departure() {
        let spans = strings(&["", "10:00 Ongole"]);
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&spans);
        assert_eq!(cell.departure, SENTINEL);
        assert_eq!(cell.arrival, SENTINEL);
    }

    #[test]
    fn slicing_counts_characters_not_bytes() {
        let spans = strings(&["०५:४५ विशाखापत्तनम", "x", "१३:५५ हावड़ा", "y"]);
        let cell = TimeLabelConvention::HhmmPrefixedV1.parse(&spans);
        assert_eq!(cell.departure, "०५:४५");
        assert_eq!(cell.source, "विशाखापत्तनम");
    }

    #[test]
    fn prices_join_with_semicolons() {
        let entries = strings(&["SL ₹ 350", " ", "3A ₹ 940", "2A ₹ 1,325"]);
        assert_eq!(join_prices(&entries), "SL ₹ 350; 3A ₹ 940; 2A ₹ 1,325");
        assert_eq!(join_prices(&[]), SENTINEL);
        assert_eq!(join_prices(&strings(&["  "])), SENTINEL);
    }

    #[test]
    fn two_t_and_two_s_runs_daily() {
        let days = strings(&["M", "T", "W", "T", "F", "S", "S"]);
        assert_eq!(classify_running_days(&days), RUNS_DAILY);
        assert_eq!(classify_running_days(&strings(&["T", "T", "S", "S"])), RUNS_DAILY);
    }

    #[test]
    fn partial_week_lists_distinct_markers() {
        assert_eq!(classify_running_days(&strings(&["T", "S"])), "T, S");
        assert_eq!(classify_running_days(&strings(&["M", "T", "T"])), "M, T");
        assert_eq!(classify_running_days(&strings(&["S", "W", "S", "T"])), "S, W, T");
    }

    #[test]
    fn no_running_days_is_missing() {
        assert_eq!(classify_running_days(&[]), SENTINEL);
    }

    #[test]
    fn convention_deserializes_from_versioned_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            labels: TimeLabelConvention,
        }
        let parsed: Wrapper = toml::from_str("labels = \"hhmm_prefixed_v1\"").unwrap();
        assert_eq!(parsed.labels, TimeLabelConvention::HhmmPrefixedV1);
    }
}
