//! Tie-inclusive top-N ranking.
//!
//! [`rank`] keeps every park tied with the value at the cut-off position, so a
//! request for the top three may return more than three parks. Display ranks
//! follow the "1, 1, 3" scheme: tied values share a rank and the next distinct
//! value takes its 1-based position.

use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

use crate::metric::{Metric, SortOrder};
use crate::park::Park;

/// Errors returned by [`rank`] and by metric/order parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankError {
    /// The metric key is not one of the known metrics.
    #[error(
        "unknown metric '{key}'; expected one of quality, safety, accessibility, \
         quantityVariety, recreation"
    )]
    InvalidMetric {
        /// Key supplied by the caller.
        key: String,
    },
    /// The sort order is neither ascending nor descending.
    #[error("unknown sort order '{value}'; expected ascending or descending")]
    InvalidOrder {
        /// Value supplied by the caller.
        value: String,
    },
    /// The requested result count was zero.
    #[error("limit must be at least 1, got {limit}")]
    InvalidLimit {
        /// Value supplied by the caller.
        limit: usize,
    },
}

/// A park selected by [`rank`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct RankedResult<'a> {
    /// The ranked park.
    pub park: &'a Park,
    /// Rank shown to the user, starting at 1.
    pub display_rank: usize,
    /// Value of the active metric.
    pub metric_value: f64,
}

/// Rank `records` by `metric` and return the tie-inclusive top `limit`.
///
/// Parks without a finite value for `metric` are dropped before sorting. The
/// sort is stable, so tied parks keep their order in `records`. An empty
/// result means no park had data for the metric.
///
/// # Errors
/// Returns [`RankError::InvalidLimit`] when `limit` is zero.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkfinder_core::{Metric, Park, ParkMetrics, SortOrder, rank};
///
/// # fn main() -> Result<(), parkfinder_core::RankError> {
/// let park = |id: u64, name: &str, quality: f64| {
///     Park::new(id, name, Coord { x: 0.0, y: 0.0 })
///         .with_metrics(ParkMetrics::default().with(Metric::Quality, quality))
/// };
/// let records = vec![park(1, "A", 5.0), park(2, "B", 5.0), park(3, "C", 3.0)];
///
/// let ranked = rank(&records, Metric::Quality, SortOrder::Descending, 1)?;
/// let names: Vec<_> = ranked.iter().map(|r| r.park.name.as_str()).collect();
/// assert_eq!(names, ["A", "B"]);
/// assert!(ranked.iter().all(|r| r.display_rank == 1));
/// # Ok(())
/// # }
/// ```
pub fn rank(
    records: &[Park],
    metric: Metric,
    order: SortOrder,
    limit: usize,
) -> Result<Vec<RankedResult<'_>>, RankError> {
    if limit == 0 {
        return Err(RankError::InvalidLimit { limit });
    }

    let mut candidates: Vec<(&Park, f64)> = records
        .iter()
        .filter_map(|park| park.metrics.rankable(metric).map(|value| (park, value)))
        .collect();
    candidates.sort_by(|(_, lhs), (_, rhs)| order.compare(*lhs, *rhs));

    let selected = tie_inclusive_len(&candidates, order, limit);
    candidates.truncate(selected);
    let ranked = assign_display_ranks(candidates, order);

    debug!(
        "ranked {} of {} parks by {metric} ({order}, limit {limit})",
        ranked.len(),
        records.len()
    );
    Ok(ranked)
}

/// Report whether any two consecutive results share a display rank.
///
/// # Examples
/// ```
/// use parkfinder_core::has_ties;
///
/// assert!(!has_ties(&[]));
/// ```
#[must_use]
pub fn has_ties(results: &[RankedResult<'_>]) -> bool {
    results
        .windows(2)
        .any(|pair| matches!(pair, [lhs, rhs] if lhs.display_rank == rhs.display_rank))
}

/// Length of the sorted prefix that is equal to or better than the value at
/// position `limit`.
fn tie_inclusive_len(sorted: &[(&Park, f64)], order: SortOrder, limit: usize) -> usize {
    let Some(&(_, cutoff)) = sorted.get(limit - 1) else {
        return sorted.len();
    };
    sorted
        .iter()
        .take_while(|(_, value)| order.compare(*value, cutoff).is_le())
        .count()
}

fn assign_display_ranks(sorted: Vec<(&Park, f64)>, order: SortOrder) -> Vec<RankedResult<'_>> {
    let mut ranked: Vec<RankedResult<'_>> = Vec::with_capacity(sorted.len());
    for (position, (park, metric_value)) in sorted.into_iter().enumerate() {
        let display_rank = match ranked.last() {
            Some(previous) if order.compare(previous.metric_value, metric_value).is_eq() => {
                previous.display_rank
            }
            _ => position + 1,
        };
        ranked.push(RankedResult {
            park,
            display_rank,
            metric_value,
        });
    }
    ranked
}
