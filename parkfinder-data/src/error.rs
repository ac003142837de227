//! Errors raised while loading a dataset.

use std::io;

use camino::Utf8PathBuf;
use parkfinder_core::CatalogError;
use thiserror::Error;

/// Errors returned by the dataset loaders.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset at {path}")]
    Open {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
        /// Path that was requested.
        path: Utf8PathBuf,
    },
    /// The dataset file was not a valid dataset document.
    #[error("failed to parse dataset at {path}")]
    Parse {
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
        /// Path that was read.
        path: Utf8PathBuf,
    },
    /// An in-memory document was not a valid dataset document.
    #[error("failed to decode dataset document")]
    Decode {
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// A record was rejected while building the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
