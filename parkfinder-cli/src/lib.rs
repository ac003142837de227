//! Command-line interface for exploring a park dataset.
//!
//! Three subcommands sit over one read-only catalog:
//!
//! - `rank` orders parks by a quality metric and prints the tie-inclusive
//!   top N.
//! - `nearby` finds parks offering every requested facility close to a
//!   coordinate.
//! - `facilities` lists the distinct facility names in the dataset.
//!
//! Every subcommand reads its options from CLI flags, `PARKFINDER_*`
//! environment variables and configuration files via `ortho_config`, and
//! writes pretty-printed JSON to stdout.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod dataset;
mod error;
mod facilities;
mod nearby;
mod output;
mod rank;

pub use error::CliError;

use facilities::FacilitiesArgs;
use nearby::NearbyArgs;
use rank::RankArgs;

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_METRIC: &str = "metric";
pub(crate) const ARG_ORDER: &str = "order";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_FACILITY: &str = "facility";
pub(crate) const ARG_RADIUS_KM: &str = "radius-km";
pub(crate) const ENV_RANK_DATASET: &str = "PARKFINDER_CMDS_RANK_DATASET";
pub(crate) const ENV_RANK_METRIC: &str = "PARKFINDER_CMDS_RANK_METRIC";
pub(crate) const ENV_NEARBY_DATASET: &str = "PARKFINDER_CMDS_NEARBY_DATASET";
pub(crate) const ENV_NEARBY_LAT: &str = "PARKFINDER_CMDS_NEARBY_LAT";
pub(crate) const ENV_NEARBY_LON: &str = "PARKFINDER_CMDS_NEARBY_LON";
pub(crate) const ENV_FACILITIES_DATASET: &str = "PARKFINDER_CMDS_FACILITIES_DATASET";

const LOG_TARGET_PREFIX: &str = "parkfinder";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, dataset loading
/// or a query fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Rank(args) => rank::run_rank(args, writer),
        Command::Nearby(args) => nearby::run_nearby(args, writer),
        Command::Facilities(args) => facilities::run_facilities(args, writer),
    }
}

/// Install a stderr subscriber; `log` records are forwarded through its
/// bridge. `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) -> Result<(), CliError> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{LOG_TARGET_PREFIX}={level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(CliError::Logging)
}

#[derive(Debug, Parser)]
#[command(
    name = "parkfinder",
    about = "Rank parks by quality and find parks near a location",
    version
)]
struct Cli {
    /// Log query details to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank parks by a quality metric.
    Rank(RankArgs),
    /// Find parks offering the requested facilities near a coordinate.
    Nearby(NearbyArgs),
    /// List the distinct facility names in the dataset.
    Facilities(FacilitiesArgs),
}

#[cfg(test)]
mod tests;
