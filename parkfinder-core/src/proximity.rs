//! Distance-based park search.
//!
//! [`search`] measures the haversine distance from a resolved [`Origin`] to
//! every park, keeps parks that offer all required facilities and returns
//! either the closest match or every match inside a radius, nearest first.
//!
//! Geocoding a postcode into an [`Origin`] happens upstream; this module only
//! accepts coordinates that are already resolved.

use std::cmp::Ordering;

use geo::{Coord, Distance, Haversine, Point};
use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

use crate::facility::FacilityQuery;
use crate::park::Park;

const METRES_PER_KILOMETRE: f64 = 1_000.0;

/// Errors returned by proximity searches.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ProximityError {
    /// The search radius was zero, negative or not finite.
    #[error("search radius must be a positive number of kilometres, got {radius_km}")]
    InvalidRadius {
        /// Radius supplied by the caller.
        radius_km: f64,
    },
    /// The origin was not a finite WGS84 coordinate.
    #[error("origin ({lat}, {lon}) is not a valid latitude/longitude pair")]
    InvalidOrigin {
        /// Latitude supplied by the caller.
        lat: f64,
        /// Longitude supplied by the caller.
        lon: f64,
    },
}

/// A validated reference point for proximity searches.
///
/// # Examples
/// ```
/// use parkfinder_core::Origin;
///
/// assert!(Origin::new(55.9533, -3.1883).is_ok());
/// assert!(Origin::new(f64::NAN, 0.0).is_err());
/// assert!(Origin::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Origin {
    lat: f64,
    lon: f64,
}

impl Origin {
    /// Validate a latitude/longitude pair in degrees.
    ///
    /// # Errors
    /// Returns [`ProximityError::InvalidOrigin`] when either value is not
    /// finite or lies outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ProximityError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(ProximityError::InvalidOrigin { lat, lon })
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.lon
    }

    /// The origin as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// How many matching parks a search returns.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(tag = "kind", rename_all = "camelCase")
)]
pub enum SearchMode {
    /// Only the single closest match.
    Nearest,
    /// Every match no further than `radius_km`.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    WithinRadius {
        /// Inclusive search radius in kilometres.
        radius_km: f64,
    },
}

impl SearchMode {
    /// Build a radius search, validating the radius up front.
    ///
    /// # Errors
    /// Returns [`ProximityError::InvalidRadius`] when `radius_km` is not a
    /// finite positive number.
    pub fn within_radius(radius_km: f64) -> Result<Self, ProximityError> {
        let mode = Self::WithinRadius { radius_km };
        mode.validate()?;
        Ok(mode)
    }

    fn validate(self) -> Result<(), ProximityError> {
        match self {
            Self::Nearest => Ok(()),
            Self::WithinRadius { radius_km } if radius_km.is_finite() && radius_km > 0.0 => Ok(()),
            Self::WithinRadius { radius_km } => Err(ProximityError::InvalidRadius { radius_km }),
        }
    }
}

/// A park matched by [`search`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct ProximityResult<'a> {
    /// The matching park.
    pub park: &'a Park,
    /// Great-circle distance from the origin in kilometres.
    pub distance_km: f64,
    /// The park's spelling of each required facility, in request order.
    pub matched_facilities: Vec<&'a str>,
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Uses the haversine formula on a spherical Earth with the mean radius. The
/// endpoints are put in a fixed order first, so swapping them yields the
/// identical value.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkfinder_core::distance_km;
///
/// let meadows = Coord { x: -3.191872, y: 55.941430 };
/// let leith_links = Coord { x: -3.163991, y: 55.971177 };
///
/// assert_eq!(distance_km(meadows, meadows), 0.0);
/// let d = distance_km(meadows, leith_links);
/// assert!((d - 3.74).abs() < 0.05, "got {d}");
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "converting metres to kilometres divides by a constant"
)]
pub fn distance_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (from, to) = if coord_order(a, b).is_le() { (a, b) } else { (b, a) };
    Haversine.distance(Point::from(from), Point::from(to)) / METRES_PER_KILOMETRE
}

fn coord_order(a: Coord<f64>, b: Coord<f64>) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

/// Find parks near `origin` that offer every facility in `required`.
///
/// Results are sorted by ascending distance; ties keep their order in
/// `records`. An empty `required` query matches every park.
///
/// # Errors
/// Returns [`ProximityError::InvalidRadius`] when `mode` is a radius search
/// with a radius that is not a finite positive number.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkfinder_core::{FacilityQuery, Origin, Park, SearchMode, search};
///
/// # fn main() -> Result<(), parkfinder_core::ProximityError> {
/// let records = vec![
///     Park::new(1_u64, "P", Coord { x: -3.19, y: 55.94 }).with_facilities(["Toilets", "Parking"]),
/// ];
/// let origin = Origin::new(55.95, -3.19)?;
///
/// let found = search(&records, origin, &FacilityQuery::new(["toilets"]), SearchMode::Nearest)?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].matched_facilities, ["Toilets"]);
/// # Ok(())
/// # }
/// ```
pub fn search<'a>(
    records: &'a [Park],
    origin: Origin,
    required: &FacilityQuery,
    mode: SearchMode,
) -> Result<Vec<ProximityResult<'a>>, ProximityError> {
    mode.validate()?;

    let start = origin.location();
    let mut candidates: Vec<ProximityResult<'a>> = records
        .iter()
        .filter_map(|park| {
            let matched_facilities = required.matches(&park.facilities)?;
            let distance = distance_km(start, park.location);
            distance.is_finite().then_some(ProximityResult {
                park,
                distance_km: distance,
                matched_facilities,
            })
        })
        .collect();
    candidates.sort_by(|lhs, rhs| lhs.distance_km.total_cmp(&rhs.distance_km));

    match mode {
        SearchMode::Nearest => candidates.truncate(1),
        SearchMode::WithinRadius { radius_km } => {
            let inside = candidates.partition_point(|c| c.distance_km <= radius_km);
            candidates.truncate(inside);
        }
    }

    debug!(
        "proximity search from ({}, {}) requiring {} facilities returned {} of {} parks",
        origin.latitude(),
        origin.longitude(),
        required.len(),
        candidates.len(),
        records.len()
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{edinburgh_parks, park_at};
    use rstest::{fixture, rstest};

    #[fixture]
    fn meadows_origin() -> Origin {
        Origin::new(55.941430, -3.191872).expect("valid origin")
    }

    fn names<'a>(results: &[ProximityResult<'a>]) -> Vec<&'a str> {
        results.iter().map(|r| r.park.name.as_str()).collect()
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn radius_must_be_positive(#[case] radius_km: f64) {
        let err = SearchMode::within_radius(radius_km).expect_err("invalid radius");
        assert!(matches!(err, ProximityError::InvalidRadius { .. }));
    }

    #[rstest]
    fn invalid_radius_is_reported_even_without_records(meadows_origin: Origin) {
        let mode = SearchMode::WithinRadius { radius_km: 0.0 };
        let err = search(&[], meadows_origin, &FacilityQuery::default(), mode)
            .expect_err("zero radius should fail");
        assert_eq!(err, ProximityError::InvalidRadius { radius_km: 0.0 });
    }

    #[rstest]
    #[case(-90.0, -180.0, true)]
    #[case(90.0, 180.0, true)]
    #[case(90.5, 0.0, false)]
    #[case(0.0, -180.5, false)]
    #[case(f64::INFINITY, 0.0, false)]
    fn origin_bounds(#[case] lat: f64, #[case] lon: f64, #[case] valid: bool) {
        assert_eq!(Origin::new(lat, lon).is_ok(), valid);
    }

    #[rstest]
    fn nearest_returns_the_single_closest_match(meadows_origin: Origin) {
        let parks = edinburgh_parks();
        let found = search(
            &parks,
            meadows_origin,
            &FacilityQuery::default(),
            SearchMode::Nearest,
        )
        .expect("search");
        assert_eq!(names(&found), ["The Meadows"]);
        assert!(found.first().expect("one result").distance_km.abs() < 1e-9);
    }

    #[rstest]
    fn radius_results_are_sorted_and_bounded(meadows_origin: Origin) {
        let parks = edinburgh_parks();
        let mode = SearchMode::within_radius(2.5).expect("radius");
        let found =
            search(&parks, meadows_origin, &FacilityQuery::default(), mode).expect("search");
        assert!(!found.is_empty());
        assert!(found.iter().all(|r| r.distance_km <= 2.5));
        assert!(
            found
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if a.distance_km <= b.distance_km))
        );
        let outside = parks
            .iter()
            .filter(|p| distance_km(meadows_origin.location(), p.location) > 2.5)
            .count();
        assert_eq!(found.len() + outside, parks.len());
    }

    #[rstest]
    #[case(Coord { x: -3.191872, y: 55.941430 }, Coord { x: -3.163991, y: 55.971177 })]
    #[case(Coord { x: 179.9, y: -45.0 }, Coord { x: -179.9, y: 45.0 })]
    #[case(Coord { x: 0.1, y: 0.0 }, Coord { x: 0.0, y: 0.0 })]
    fn distance_is_exactly_symmetric(#[case] a: Coord<f64>, #[case] b: Coord<f64>) {
        assert_eq!(distance_km(a, b).to_bits(), distance_km(b, a).to_bits());
    }

    #[rstest]
    fn radius_boundary_is_inclusive() {
        let park = park_at(1, "Edge", 55.95, -3.19);
        let origin = Origin::new(55.94, -3.19).expect("origin");
        let exact = distance_km(origin.location(), park.location);
        let records = vec![park];
        let mode = SearchMode::within_radius(exact).expect("radius");
        let found = search(&records, origin, &FacilityQuery::default(), mode).expect("search");
        assert_eq!(found.len(), 1);
    }

    #[rstest]
    fn partial_facility_matches_are_excluded(meadows_origin: Origin) {
        let records = vec![
            park_at(1, "Both", 55.95, -3.19).with_facilities(["Toilets", "Cafe"]),
            park_at(2, "Toilets only", 55.9415, -3.1919).with_facilities(["Toilets"]),
        ];
        let query = FacilityQuery::new([" CAFE", "toilets"]);
        let found = search(&records, meadows_origin, &query, SearchMode::Nearest).expect("search");
        assert_eq!(names(&found), ["Both"]);
        assert_eq!(
            found.first().expect("one result").matched_facilities,
            ["Cafe", "Toilets"]
        );
    }

    #[rstest]
    fn no_match_yields_empty_result(meadows_origin: Origin) {
        let parks = edinburgh_parks();
        let query = FacilityQuery::new(["Playground"]);
        let mode = SearchMode::within_radius(1.0).expect("radius");
        let found = search(&parks, meadows_origin, &query, mode).expect("search");
        assert!(found.is_empty());
    }

    #[rstest]
    fn equidistant_parks_keep_catalogue_order(meadows_origin: Origin) {
        let records = vec![
            park_at(1, "First", 55.95, -3.19),
            park_at(2, "Second", 55.95, -3.19),
        ];
        let mode = SearchMode::within_radius(50.0).expect("radius");
        let found =
            search(&records, meadows_origin, &FacilityQuery::default(), mode).expect("search");
        assert_eq!(names(&found), ["First", "Second"]);
    }
}
