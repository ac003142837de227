//! Property-based tests for the ranking and proximity engines.
//!
//! # Invariants tested
//!
//! - **Known values only:** ranking never returns a park without a finite
//!   value for the active metric.
//! - **Tie inclusion:** every park tied with the cut-off value is returned.
//! - **Display ranks:** consecutive results share a rank exactly when their
//!   values are equal; otherwise the rank is the 1-based position.
//! - **Conjunctive matching:** search never returns a park lacking a required
//!   facility, whatever the casing or padding of the request.
//! - **Nearest mode:** returns at most one result.
//! - **Distance:** zero for identical points and symmetric.

use geo::Coord;
use parkfinder_core::{
    FacilityQuery, Metric, Origin, Park, ParkMetrics, SearchMode, SortOrder, distance_km, rank,
    search,
};
use proptest::prelude::*;

const FACILITIES: [&str; 4] = ["Toilets", "Parking", "Cafe", "Playground"];

/// Scores drawn from a small integer range so ties are common; `None` and
/// `NaN` stand in for missing data.
fn score_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (0_i8..6).prop_map(|v| Some(f64::from(v))),
        1 => Just(None),
        1 => Just(Some(f64::NAN)),
    ]
}

fn scored_parks(scores: &[Option<f64>]) -> Vec<Park> {
    scores
        .iter()
        .zip(1_u64..)
        .map(|(score, id)| {
            let mut metrics = ParkMetrics::default();
            metrics.set(Metric::Safety, *score);
            Park::new(id, format!("Park {id}"), Coord { x: 0.0, y: 0.0 }).with_metrics(metrics)
        })
        .collect()
}

fn coord_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-89.0_f64..89.0, -179.0_f64..179.0).prop_map(|(lat, lon)| Coord { x: lon, y: lat })
}

fn facility_park_strategy() -> impl Strategy<Value = (Coord<f64>, Vec<bool>)> {
    (coord_strategy(), proptest::collection::vec(any::<bool>(), FACILITIES.len()))
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn ranking_returns_only_known_values(
        scores in proptest::collection::vec(score_strategy(), 0..30),
        order in order_strategy(),
        limit in 1_usize..40,
    ) {
        let parks = scored_parks(&scores);
        let ranked = rank(&parks, Metric::Safety, order, limit).expect("valid limit");
        for result in &ranked {
            prop_assert!(result.metric_value.is_finite());
            prop_assert_eq!(result.park.metrics.safety, Some(result.metric_value));
        }
    }

    #[test]
    fn ranking_includes_every_tie_at_the_cutoff(
        scores in proptest::collection::vec(score_strategy(), 0..30),
        order in order_strategy(),
        limit in 1_usize..40,
    ) {
        let parks = scored_parks(&scores);
        let known = parks.iter().filter(|p| p.metrics.rankable(Metric::Safety).is_some()).count();
        let ranked = rank(&parks, Metric::Safety, order, limit).expect("valid limit");

        if known <= limit {
            prop_assert_eq!(ranked.len(), known);
        } else {
            prop_assert!(ranked.len() >= limit);
            let cutoff = ranked.last().expect("non-empty").metric_value;
            let tied = parks
                .iter()
                .filter(|p| p.metrics.rankable(Metric::Safety) == Some(cutoff))
                .count();
            let returned_tied = ranked.iter().filter(|r| r.metric_value == cutoff).count();
            prop_assert_eq!(tied, returned_tied);
        }
    }

    #[test]
    fn display_ranks_follow_values(
        scores in proptest::collection::vec(score_strategy(), 0..30),
        order in order_strategy(),
        limit in 1_usize..40,
    ) {
        let parks = scored_parks(&scores);
        let ranked = rank(&parks, Metric::Safety, order, limit).expect("valid limit");
        if let Some(first) = ranked.first() {
            prop_assert_eq!(first.display_rank, 1);
        }
        for (index, pair) in ranked.windows(2).enumerate() {
            let [previous, current] = pair else { continue };
            if current.metric_value == previous.metric_value {
                prop_assert_eq!(current.display_rank, previous.display_rank);
            } else {
                prop_assert_eq!(current.display_rank, index + 2);
            }
        }
    }

    #[test]
    fn search_never_returns_partial_matches(
        parks in proptest::collection::vec(facility_park_strategy(), 0..15),
        origin in coord_strategy(),
        first in 0_usize..FACILITIES.len(),
        second in 0_usize..FACILITIES.len(),
        padded in any::<bool>(),
    ) {
        let records: Vec<Park> = parks
            .iter()
            .zip(1_u64..)
            .map(|((location, offered), id)| {
                let names = FACILITIES
                    .iter()
                    .zip(offered)
                    .filter(|(_, offered)| **offered)
                    .map(|(name, _)| name.to_lowercase());
                Park::new(id, format!("Park {id}"), *location).with_facilities(names)
            })
            .collect();
        let wanted: Vec<String> = [first, second]
            .iter()
            .filter_map(|&i| FACILITIES.get(i))
            .map(|name| if padded { format!("  {}  ", name.to_uppercase()) } else { (*name).to_owned() })
            .collect();
        let origin = Origin::new(origin.y, origin.x).expect("in range");
        let mode = SearchMode::within_radius(25_000.0).expect("valid radius");

        let found = search(&records, origin, &FacilityQuery::new(&wanted), mode).expect("search");
        for result in &found {
            for name in &wanted {
                prop_assert!(result.park.has_facility(name));
            }
        }
    }

    #[test]
    fn nearest_returns_at_most_one(
        parks in proptest::collection::vec(facility_park_strategy(), 0..15),
        origin in coord_strategy(),
    ) {
        let records: Vec<Park> = parks
            .iter()
            .zip(1_u64..)
            .map(|((location, _), id)| Park::new(id, format!("Park {id}"), *location))
            .collect();
        let origin = Origin::new(origin.y, origin.x).expect("in range");
        let found = search(&records, origin, &FacilityQuery::default(), SearchMode::Nearest)
            .expect("search");
        prop_assert!(found.len() <= 1);
        prop_assert_eq!(found.is_empty(), records.is_empty());
    }

    #[test]
    fn distance_is_zero_to_self_and_symmetric(a in coord_strategy(), b in coord_strategy()) {
        prop_assert_eq!(distance_km(a, a), 0.0);
        let forward = distance_km(a, b);
        let backward = distance_km(b, a);
        prop_assert!(forward >= 0.0);
        prop_assert_eq!(forward.to_bits(), backward.to_bits());
    }
}
