use std::path::PathBuf;

use clap::{Parser, Subcommand};
use xii_search::config::SearchConfig;

use self::{rank::RankArg, select::SelectArg};
use crate::util;

mod rank;
mod select;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Select the Playing XII for a squad at a venue
    Select(#[clap(flatten)] SelectArg),
    /// List the squad's players at a venue ranked by score
    Rank(#[clap(flatten)] RankArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Select(arg) => select::run(&arg)?,
        Mode::Rank(arg) => rank::run(&arg)?,
    }
    Ok(())
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments shared by every command that builds a player pool.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PoolArg {
    /// Dataset JSON file with `batting` and `bowling` records
    #[arg(long)]
    data: PathBuf,
    /// Match venue
    #[arg(long)]
    venue: String,
    /// Squad players, comma-separated
    #[arg(long, required_unless_present = "squad_file")]
    squad: Option<String>,
    /// File listing squad players, one per line or comma-separated
    #[arg(long, conflicts_with = "squad")]
    squad_file: Option<PathBuf>,
    /// Search configuration JSON file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Nation whose players do not count as foreign
    #[arg(long)]
    home_nation: Option<String>,
    /// Compare venue names ignoring ASCII case
    #[arg(long)]
    ignore_venue_case: bool,
}

impl PoolArg {
    fn squad(&self) -> anyhow::Result<Vec<String>> {
        match (&self.squad, &self.squad_file) {
            (Some(list), _) => Ok(util::parse_squad(list)),
            (None, Some(path)) => util::read_squad_file(path),
            (None, None) => anyhow::bail!("Either --squad or --squad-file is required"),
        }
    }

    fn config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_search_config_file(path)?,
            None => SearchConfig::default(),
        };
        if let Some(home_nation) = &self.home_nation {
            config.home_nation.clone_from(home_nation);
        }
        if self.ignore_venue_case {
            config.venue_match = xii_core::VenueMatch::IgnoreAsciiCase;
        }
        Ok(config)
    }
}
