//! Resolving and loading the dataset shared by every subcommand.

use camino::{Utf8Path, Utf8PathBuf};
use parkfinder_core::ParkCatalog;
use parkfinder_data::{dataset_is_file, load_catalog};

use crate::{ARG_DATASET, CliError};

/// Take the merged dataset path or report which variable can supply it.
pub(crate) fn require_dataset(
    dataset: Option<Utf8PathBuf>,
    env: &'static str,
) -> Result<Utf8PathBuf, CliError> {
    dataset.ok_or(CliError::MissingArgument {
        field: ARG_DATASET,
        env,
    })
}

/// Check that `path` names an existing regular file.
pub(crate) fn validate_dataset(path: &Utf8Path) -> Result<(), CliError> {
    match dataset_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field: ARG_DATASET,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field: ARG_DATASET,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field: ARG_DATASET,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Validate and load the catalog at `path`.
pub(crate) fn load(path: &Utf8Path) -> Result<ParkCatalog, CliError> {
    validate_dataset(path)?;
    Ok(load_catalog(path)?)
}
