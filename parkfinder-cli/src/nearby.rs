//! `nearby` command: facility-filtered proximity search.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkfinder_core::{FacilityQuery, Origin, SearchMode, search};
use serde::{Deserialize, Serialize};

use crate::output::{NearbyOutput, write_json};
use crate::{
    ARG_DATASET, ARG_FACILITY, ARG_LAT, ARG_LON, ARG_RADIUS_KM, CliError, ENV_NEARBY_DATASET,
    ENV_NEARBY_LAT, ENV_NEARBY_LON, dataset,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find parks offering every requested facility near a \
                 coordinate. Without --radius-km only the single nearest \
                 match is printed; with it, every match inside the radius is \
                 printed nearest first.",
    about = "Find parks near a coordinate"
)]
#[ortho_config(prefix = "PARKFINDER")]
pub(crate) struct NearbyArgs {
    /// Path to the JSON park dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Latitude of the search origin in degrees.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search origin in degrees.
    #[arg(long = ARG_LON, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Facility every result must offer; repeat for several.
    #[arg(long = ARG_FACILITY, value_name = "name")]
    #[serde(default)]
    pub(crate) facility: Option<Vec<String>>,
    /// Return every match within this many kilometres instead of the nearest.
    #[arg(long = ARG_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
}

impl NearbyArgs {
    pub(crate) fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) origin: Origin,
    pub(crate) facilities: FacilityQuery,
    pub(crate) mode: SearchMode,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let dataset = dataset::require_dataset(args.dataset, ENV_NEARBY_DATASET)?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_NEARBY_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_NEARBY_LON,
        })?;
        let origin = Origin::new(lat, lon)?;
        let mode = match args.radius_km {
            Some(radius_km) => SearchMode::within_radius(radius_km)?,
            None => SearchMode::Nearest,
        };
        Ok(Self {
            dataset,
            origin,
            facilities: FacilityQuery::new(args.facility.unwrap_or_default()),
            mode,
        })
    }
}

pub(crate) fn run_nearby(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_nearby(&config, writer)
}

pub(crate) fn execute_nearby(
    config: &NearbyConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalog = dataset::load(&config.dataset)?;
    let results = search(catalog.all(), config.origin, &config.facilities, config.mode)?;
    write_json(writer, &NearbyOutput { results })
}
