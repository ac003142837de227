//! JSON rendering of command results.

use std::io::Write;

use parkfinder_core::{ProximityResult, RankedResult};
use serde::Serialize;

use crate::CliError;

/// Output of the `rank` command.
#[derive(Debug, Serialize)]
pub(crate) struct RankOutput<'a> {
    pub(crate) results: Vec<RankedResult<'a>>,
    /// Whether any two results share a display rank.
    pub(crate) ties: bool,
}

/// Output of the `nearby` command.
#[derive(Debug, Serialize)]
pub(crate) struct NearbyOutput<'a> {
    pub(crate) results: Vec<ProximityResult<'a>>,
}

/// Output of the `facilities` command.
#[derive(Debug, Serialize)]
pub(crate) struct FacilitiesOutput<'a> {
    pub(crate) facilities: Vec<&'a str>,
}

pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
