//! Dataset loading for the park finder.
//!
//! Responsibilities:
//! - Read the JSON park dataset from disk or any reader.
//! - Join the optional facility table onto park records.
//! - Coerce loosely typed source values (numeric or textual site ids,
//!   non-numeric metrics) into the core model.
//!
//! Boundaries:
//! - Validation of the finished records lives in
//!   [`ParkCatalog::new`](parkfinder_core::ParkCatalog::new).
//! - No network access; geocoding happens elsewhere.
//!
//! # Examples
//! ```
//! use parkfinder_data::catalog_from_str;
//!
//! # fn main() -> Result<(), parkfinder_data::DatasetError> {
//! let catalog = catalog_from_str(
//!     r#"{
//!         "parks": [
//!             { "site_id": 7, "name": "Leith Links", "lat": 55.971177, "lon": -3.163991,
//!               "quality": 0.81234 }
//!         ],
//!         "facilities": [ { "site_id": "7", "facility_name": "Toilets" } ]
//!     }"#,
//! )?;
//!
//! let park = catalog.find_by_site_id(&7).expect("park loaded");
//! assert_eq!(park.metrics.quality, Some(0.812));
//! assert!(park.has_facility("toilets"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod raw;
mod source;

use std::io::{BufReader, Read};

use camino::Utf8Path;
use log::info;
use parkfinder_core::ParkCatalog;

pub use error::DatasetError;
pub use raw::{RawDataset, RawFacility, RawPark, RawSiteId};
pub use source::{dataset_is_file, open_dataset_file};

/// Load and validate the dataset at `path`.
///
/// # Errors
/// Returns [`DatasetError::Open`] when the file cannot be opened,
/// [`DatasetError::Parse`] when it is not a valid dataset document and
/// [`DatasetError::Catalog`] when a record fails validation.
pub fn load_catalog(path: &Utf8Path) -> Result<ParkCatalog, DatasetError> {
    let file = open_dataset_file(path).map_err(|source| DatasetError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    let dataset: RawDataset =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Parse {
            source,
            path: path.to_path_buf(),
        })?;
    let catalog = dataset.into_catalog()?;
    info!("loaded {} parks from {path}", catalog.len());
    Ok(catalog)
}

/// Build a catalog from a dataset document read from `reader`.
///
/// # Errors
/// Returns [`DatasetError::Decode`] for malformed JSON and
/// [`DatasetError::Catalog`] when a record fails validation.
pub fn catalog_from_reader<R: Read>(reader: R) -> Result<ParkCatalog, DatasetError> {
    let dataset: RawDataset = serde_json::from_reader(BufReader::new(reader))
        .map_err(|source| DatasetError::Decode { source })?;
    Ok(dataset.into_catalog()?)
}

/// Build a catalog from an in-memory dataset document.
///
/// # Errors
/// See [`catalog_from_reader`].
pub fn catalog_from_str(json: &str) -> Result<ParkCatalog, DatasetError> {
    let dataset: RawDataset =
        serde_json::from_str(json).map_err(|source| DatasetError::Decode { source })?;
    Ok(dataset.into_catalog()?)
}
