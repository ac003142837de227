//! `rank` command: order parks by a quality metric.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkfinder_core::{Metric, SortOrder, has_ties, rank};
use serde::{Deserialize, Serialize};

use crate::output::{RankOutput, write_json};
use crate::{
    ARG_DATASET, ARG_LIMIT, ARG_METRIC, ARG_ORDER, CliError, ENV_RANK_DATASET, ENV_RANK_METRIC,
    dataset,
};

/// Number of parks returned when no limit is configured.
pub(crate) const DEFAULT_LIMIT: usize = 10;

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank parks by a quality metric and print the top N. Parks \
                 tied with the last place are all included, so the output may \
                 hold more than N parks.",
    about = "Rank parks by a quality metric"
)]
#[ortho_config(prefix = "PARKFINDER")]
pub(crate) struct RankArgs {
    /// Path to the JSON park dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Metric to rank by: quality, safety, accessibility, quantityVariety or
    /// recreation.
    #[arg(long = ARG_METRIC, value_name = "key")]
    #[serde(default)]
    pub(crate) metric: Option<String>,
    /// Sort order: descending (default) or ascending.
    #[arg(long = ARG_ORDER, value_name = "order")]
    #[serde(default)]
    pub(crate) order: Option<String>,
    /// Number of places to return before ties are added.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) metric: Metric,
    pub(crate) order: SortOrder,
    pub(crate) limit: usize,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let dataset = dataset::require_dataset(args.dataset, ENV_RANK_DATASET)?;
        let metric = args
            .metric
            .ok_or(CliError::MissingArgument {
                field: ARG_METRIC,
                env: ENV_RANK_METRIC,
            })?
            .parse::<Metric>()?;
        let order = args
            .order
            .map(|order| order.parse::<SortOrder>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            dataset,
            metric,
            order,
            limit: args.limit.unwrap_or(DEFAULT_LIMIT),
        })
    }
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let catalog = dataset::load(&config.dataset)?;
    let results = rank(catalog.all(), config.metric, config.order, config.limit)?;
    if results.is_empty() {
        debug!("no park has a value for {}", config.metric);
    }
    let ties = has_ties(&results);
    write_json(writer, &RankOutput { results, ties })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
