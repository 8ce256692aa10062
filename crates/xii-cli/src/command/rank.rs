use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use xii_core::{PlayerPool, TeamRules};
use xii_evaluator::{player_evaluator::WeightedPlayerEvaluator, team_evaluator::TeamEvaluator};

use super::{OutputFormat, PoolArg};
use crate::{
    schema::ranking::RankedPlayer,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RankArg {
    #[clap(flatten)]
    pool: PoolArg,
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RankArg) -> anyhow::Result<()> {
    let config = arg.pool.config()?;
    let squad = arg.pool.squad()?;
    let venue = arg.pool.venue.trim();
    let dataset = util::read_dataset_file(&arg.pool.data)?;

    // the ranking lists whatever the venue offers, even too few players for a team
    let rules = TeamRules {
        min_batters: 0,
        min_bowlers: 0,
        ..config.rules.clone()
    };
    let pool = PlayerPool::build(&dataset, &config.pool_query(&squad, venue), &rules)?;
    let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::new(config.weights), &pool);
    let ranked = RankedPlayer::ranking(&pool, &evaluator);

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Text => {
            for player in &ranked {
                writeln!(output, "{player}").with_context(|| {
                    format!("Failed to write ranking to {}", output.display_path())
                })?;
            }
            output
                .flush()
                .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
        }
        OutputFormat::Json => output.write_json(&ranked)?,
    }

    eprintln!(
        "Ranked {} of {} squad players with stats at {venue}",
        ranked.len(),
        squad.len()
    );
    if pool.ensure_role_minimums(&config.rules).is_err() {
        eprintln!("Not enough batting or bowling candidates to select a team here.");
    }

    Ok(())
}
