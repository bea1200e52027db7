//! Positionally correlated field columns and the policies used to zip them
//! into rows.
//!
//! Every locator query yields one [`FieldColumn`] in document order. Columns
//! gathered from independent queries only line up by index, so turning them
//! into rows always goes through [`AlignedColumns::into_rows`] with an
//! explicit [`ReconcilePolicy`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::SENTINEL;

/// An ordered sequence of extracted values sharing one semantic role.
///
/// Order corresponds to the document order of the matched elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldColumn {
    /// Semantic role of the column (e.g. `"fare"`).
    pub role: String,
    /// Extracted values, in document order.
    pub values: Vec<String>,
}

impl FieldColumn {
    /// Creates a column for `role` from already-extracted values.
    #[must_use]
    pub fn new(role: &str, values: Vec<String>) -> Self {
        Self {
            role: role.to_owned(),
            values,
        }
    }

    /// Number of values in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How columns of different lengths are reconciled before zipping.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Zip up to the shortest column; trailing values of longer columns are
    /// dropped.
    #[default]
    Truncate,
    /// Pad every column with [`SENTINEL`] up to the longest column.
    Pad,
    /// Refuse to zip ragged columns.
    Reject,
}

/// Ragged columns were zipped under [`ReconcilePolicy::Reject`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("column lengths disagree: {}", describe_lengths(.lengths))]
pub struct ColumnMismatch {
    /// `(role, length)` for every column, in column order.
    pub lengths: Vec<(String, usize)>,
}

/// Formats `(role, length)` pairs, e.g. `"name=3, fare=2"`.
#[must_use]
pub fn describe_lengths(lengths: &[(String, usize)]) -> String {
    lengths
        .iter()
        .map(|(role, len)| format!("{role}={len}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A fixed set of `N` columns that are zipped together by position.
#[derive(Debug, Clone)]
pub struct AlignedColumns<const N: usize> {
    columns: [FieldColumn; N],
}

/// The outcome of zipping [`AlignedColumns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<const N: usize> {
    /// Zipped rows, one value from each column per row.
    pub rows: Vec<[String; N]>,
    /// `(role, length)` of every column before reconciliation.
    pub lengths: Vec<(String, usize)>,
    /// The policy that produced `rows`.
    pub policy: ReconcilePolicy,
}

impl<const N: usize> Alignment<N> {
    /// Whether the source columns had different lengths.
    #[must_use]
    pub fn is_ragged(&self) -> bool {
        is_ragged(&self.lengths)
    }
}

/// Whether any two `(role, length)` pairs disagree on length.
#[must_use]
pub fn is_ragged(lengths: &[(String, usize)]) -> bool {
    lengths.windows(2).any(|pair| pair[0].1 != pair[1].1)
}

impl<const N: usize> AlignedColumns<N> {
    /// Wraps `N` columns for positional zipping.
    #[must_use]
    pub const fn new(columns: [FieldColumn; N]) -> Self {
        Self { columns }
    }

    /// `(role, length)` of every column, in column order.
    #[must_use]
    pub fn lengths(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .map(|c| (c.role.clone(), c.len()))
            .collect()
    }

    /// Zips the columns into rows according to `policy`.
    ///
    /// A length mismatch is logged at `warn` level regardless of the policy.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnMismatch`] when the columns are ragged and `policy` is
    /// [`ReconcilePolicy::Reject`].
    pub fn into_rows(self, policy: ReconcilePolicy) -> Result<Alignment<N>, ColumnMismatch> {
        let lengths = self.lengths();
        let shortest = lengths.iter().map(|(_, len)| *len).min().unwrap_or(0);
        let longest = lengths.iter().map(|(_, len)| *len).max().unwrap_or(0);

        if shortest != longest {
            log::warn!(
                "Column length mismatch ({policy}): {}",
                describe_lengths(&lengths)
            );
        }

        let row_count = match policy {
            ReconcilePolicy::Truncate => shortest,
            ReconcilePolicy::Pad => longest,
            ReconcilePolicy::Reject if shortest == longest => longest,
            ReconcilePolicy::Reject => return Err(ColumnMismatch { lengths }),
        };

        let mut iters = self.columns.map(|c| c.values.into_iter());
        let rows = (0..row_count)
            .map(|_| {
                std::array::from_fn(|i| iters[i].next().unwrap_or_else(|| SENTINEL.to_owned()))
            })
            .collect();

        Ok(Alignment {
            rows,
            lengths,
            policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(role: &str, values: &[&str]) -> FieldColumn {
        FieldColumn::new(role, values.iter().map(|v| (*v).to_owned()).collect())
    }

    #[test]
    fn truncate_stops_at_shortest_column() {
        let aligned = AlignedColumns::new([col("a", &["1", "2", "3"]), col("b", &["x", "y"])]);
        let out = aligned.into_rows(ReconcilePolicy::Truncate).unwrap();
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[1], ["2".to_owned(), "y".to_owned()]);
        assert!(out.is_ragged());
    }

    #[test]
    fn pad_fills_short_columns_with_sentinel() {
        let aligned = AlignedColumns::new([col("a", &["1", "2", "3"]), col("b", &["x"])]);
        let out = aligned.into_rows(ReconcilePolicy::Pad).unwrap();
        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[2], ["3".to_owned(), SENTINEL.to_owned()]);
        assert_eq!(out.rows[1][1], SENTINEL);
    }

    #[test]
    fn reject_refuses_ragged_columns() {
        let aligned = AlignedColumns::new([col("a", &["1", "2"]), col("b", &["x"])]);
        let err = aligned.into_rows(ReconcilePolicy::Reject).unwrap_err();
        assert_eq!(err.to_string(), "column lengths disagree: a=2, b=1");
    }

    #[test]
    fn reject_accepts_even_columns() {
        let aligned = AlignedColumns::new([col("a", &["1"]), col("b", &["x"])]);
        let out = aligned.into_rows(ReconcilePolicy::Reject).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert!(!out.is_ragged());
    }

    #[test]
    fn empty_columns_produce_no_rows_under_any_policy() {
        for policy in [
            ReconcilePolicy::Truncate,
            ReconcilePolicy::Pad,
            ReconcilePolicy::Reject,
        ] {
            let aligned = AlignedColumns::new([col("a", &[]), col("b", &[])]);
            assert!(aligned.into_rows(policy).unwrap().rows.is_empty());
        }
    }

    #[test]
    fn length_helpers_describe_ragged_columns() {
        let lengths = vec![("name".to_owned(), 3), ("fare".to_owned(), 2)];
        assert!(is_ragged(&lengths));
        assert!(!is_ragged(&lengths[..1]));
        assert_eq!(describe_lengths(&lengths), "name=3, fare=2");
    }

    #[test]
    fn policy_parses_from_snake_case() {
        assert_eq!("pad".parse::<ReconcilePolicy>().unwrap(), ReconcilePolicy::Pad);
        assert_eq!(ReconcilePolicy::Truncate.to_string(), "truncate");
    }
}
