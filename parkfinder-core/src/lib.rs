//! Core domain types and query engines for the park finder.
//!
//! The crate holds the read-only [`ParkCatalog`] and the two pure query
//! engines that run over it:
//!
//! - [`rank`] orders parks by a quality [`Metric`] and returns a tie-inclusive
//!   top-N with competition-style display ranks.
//! - [`search`] measures the great-circle distance from an [`Origin`], keeps
//!   parks offering every requested facility and returns either the nearest
//!   one or all of them within a radius.
//!
//! Both engines borrow their input and never mutate it. Rendering, exports and
//! geocoding are left to callers.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use parkfinder_core::{Metric, Park, ParkCatalog, ParkMetrics, SortOrder, rank};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = ParkCatalog::new(vec![
//!     Park::new(1_u64, "Inch Park", Coord { x: -3.160420, y: 55.926125 })
//!         .with_metrics(ParkMetrics::default().with(Metric::Quality, 0.7)),
//!     Park::new(2_u64, "Leith Links", Coord { x: -3.163991, y: 55.971177 })
//!         .with_metrics(ParkMetrics::default().with(Metric::Quality, 0.9)),
//! ])?;
//!
//! let top = rank(catalog.all(), Metric::Quality, SortOrder::Descending, 1)?;
//! assert_eq!(top.len(), 1);
//! assert_eq!(top[0].park.name, "Leith Links");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod facility;
pub mod metric;
pub mod park;
pub mod proximity;
pub mod ranking;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use catalog::{CatalogError, MalformedReason, ParkCatalog};
pub use facility::{FacilityQuery, FacilitySet};
pub use metric::{Metric, SortOrder};
pub use park::{Park, ParkDetails, ParkMetrics, SiteId};
pub use proximity::{
    Origin, ProximityError, ProximityResult, SearchMode, distance_km, search,
};
pub use ranking::{RankError, RankedResult, has_ties, rank};
