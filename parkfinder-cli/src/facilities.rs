//! `facilities` command: list the facility vocabulary of a dataset.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{FacilitiesOutput, write_json};
use crate::{ARG_DATASET, CliError, ENV_FACILITIES_DATASET, dataset};

/// CLI arguments for the `facilities` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List the distinct facility names in the dataset")]
#[ortho_config(prefix = "PARKFINDER")]
pub(crate) struct FacilitiesArgs {
    /// Path to the JSON park dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

pub(crate) fn run_facilities(args: FacilitiesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = dataset::require_dataset(merged.dataset, ENV_FACILITIES_DATASET)?;
    execute_facilities(&path, writer)
}

pub(crate) fn execute_facilities(
    path: &Utf8Path,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalog = dataset::load(path)?;
    write_json(
        writer,
        &FacilitiesOutput {
            facilities: catalog.facility_names(),
        },
    )
}
