//! Facade crate for the park finder.
//!
//! This crate re-exports the core domain types and query engines, and exposes
//! the JSON dataset loader behind the `data` feature.

#![forbid(unsafe_code)]

pub use parkfinder_core::{
    CatalogError, FacilityQuery, FacilitySet, MalformedReason, Metric, Origin, Park, ParkCatalog,
    ParkDetails, ParkMetrics, ProximityError, ProximityResult, RankError, RankedResult,
    SearchMode, SiteId, SortOrder, distance_km, has_ties, rank, search,
};

#[cfg(feature = "data")]
pub use parkfinder_data::{DatasetError, catalog_from_reader, catalog_from_str, load_catalog};
