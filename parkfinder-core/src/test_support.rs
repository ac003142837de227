//! Test-only park fixtures used by unit and behaviour tests.

use geo::Coord;

use crate::{Metric, Park, ParkMetrics};

/// Build a park at the given latitude and longitude with no metrics.
#[must_use]
pub fn park_at(id: u64, name: &str, lat: f64, lon: f64) -> Park {
    Park::new(id, name, Coord { x: lon, y: lat })
}

/// Build a park named after its id with an optional quality score.
#[must_use]
pub fn scored_park(id: u64, quality: Option<f64>) -> Park {
    let mut metrics = ParkMetrics::default();
    metrics.set(Metric::Quality, quality);
    Park::new(id, format!("Park {id}"), Coord { x: 0.0, y: 0.0 }).with_metrics(metrics)
}

/// A handful of Edinburgh parks with realistic coordinates and facilities.
///
/// None of them lists a playground, which lets tests exercise empty
/// facility searches.
#[must_use]
pub fn edinburgh_parks() -> Vec<Park> {
    vec![
        park_at(1, "Saughton Park", 55.936426, -3.248595)
            .with_facilities(["Toilets", "Cafe", "Parking"])
            .with_metrics(metrics(0.82, 0.71, 0.90, 0.64, 0.77)),
        park_at(2, "Inch Park", 55.926125, -3.160420)
            .with_facilities(["Parking", "Sports Pitches"])
            .with_metrics(metrics(0.61, 0.58, 0.70, 0.55, 0.60)),
        park_at(3, "Dalry Community Park", 55.941066, -3.221282)
            .with_facilities(["Benches"])
            .with_metrics(metrics(0.45, 0.50, 0.62, 0.31, 0.47)),
        park_at(4, "Leith Links", 55.971177, -3.163991)
            .with_facilities(["Toilets", "Sports Pitches", "Benches"])
            .with_metrics(metrics(0.82, 0.66, 0.75, 0.70, 0.74)),
        park_at(5, "The Meadows", 55.941430, -3.191872)
            .with_facilities(["Toilets", "Cafe", "Tennis Courts", "Benches"])
            .with_metrics(metrics(0.91, 0.73, 0.88, 0.85, 0.86)),
        park_at(6, "Harrison Park East", 55.936485, -3.223683)
            .with_facilities(["Benches", "Canal Access"]),
        park_at(7, "Inverleith Park", 55.963483, -3.217358)
            .with_facilities(["Toilets", "Parking", "Pond"])
            .with_metrics(metrics(0.88, 0.80, 0.79, 0.72, 0.81)),
    ]
}

fn metrics(
    quality: f64,
    safety: f64,
    accessibility: f64,
    quantity_variety: f64,
    recreation: f64,
) -> ParkMetrics {
    ParkMetrics {
        quality: Some(quality),
        safety: Some(safety),
        accessibility: Some(accessibility),
        quantity_variety: Some(quantity_variety),
        recreation: Some(recreation),
    }
}
