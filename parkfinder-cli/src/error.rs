//! Error types emitted by the park finder CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use parkfinder_core::{ProximityError, RankError};
use parkfinder_data::DatasetError;
use thiserror::Error;

/// Errors emitted by the park finder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The logging subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] tracing_subscriber::util::TryInitError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag the path came from.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag the path came from.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag the path came from.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Loading the dataset failed.
    #[error("failed to load dataset: {0}")]
    Dataset(#[source] Box<DatasetError>),
    /// The ranking options were rejected.
    #[error(transparent)]
    Rank(#[from] RankError),
    /// The proximity search options were rejected.
    #[error(transparent)]
    Proximity(#[from] ProximityError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<DatasetError> for CliError {
    fn from(err: DatasetError) -> Self {
        Self::Dataset(Box::new(err))
    }
}
