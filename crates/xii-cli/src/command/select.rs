use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use xii_core::ReservePolicy;
use xii_search::{
    SelectionError,
    config::{SearchConfig, SearchSeed, Strategy},
};

use super::{OutputFormat, PoolArg};
use crate::{
    schema::selection::SelectionDocument,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelectArg {
    #[clap(flatten)]
    pool: PoolArg,
    /// Search strategy (genetic or greedy)
    #[arg(long)]
    strategy: Option<Strategy>,
    /// Seed for a reproducible search
    #[arg(long)]
    seed: Option<SearchSeed>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Candidates per generation
    #[arg(long)]
    population: Option<usize>,
    /// Candidates kept unchanged each generation
    #[arg(long)]
    elite: Option<usize>,
    /// Probability of mutating a child
    #[arg(long)]
    mutation_rate: Option<f32>,
    /// Field the XI without a 12th man when only eleven players qualify
    #[arg(long)]
    allow_short_reserve: bool,
    /// Stop evolving after this many milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SelectArg {
    fn config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = self.pool.config()?;
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(population) = self.population {
            config.population_size = population;
            config.elite_count = config.elite_count.min((population / 2).max(1));
        }
        if let Some(elite) = self.elite {
            config.elite_count = elite;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if self.allow_short_reserve {
            config.rules.reserve_policy = ReservePolicy::BestEffort;
        }
        if let Some(ms) = self.time_budget_ms {
            config.time_budget_ms = Some(ms);
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &SelectArg) -> anyhow::Result<()> {
    let config = arg.config()?;
    let squad = arg.pool.squad()?;
    let venue = arg.pool.venue.trim();
    let dataset = util::read_dataset_file(&arg.pool.data)?;

    eprintln!(
        "Selecting from {} squad players at {venue} ({} strategy)...",
        squad.len(),
        config.strategy
    );
    let selection = match xii_search::select_team(&dataset, &squad, venue, &config) {
        Ok(selection) => selection,
        Err(err @ SelectionError::InsufficientData(_)) => {
            eprintln!("Not enough players in the squad with stats for {venue}.");
            return Err(err).context("No team selected");
        }
        Err(err) => {
            eprintln!("The search could not produce a valid team.");
            return Err(err).context("No team selected");
        }
    };

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Text => {
            writeln!(output, "{}", selection.sheet)
                .and_then(|()| output.flush())
                .with_context(|| format!("Failed to write team to {}", output.display_path()))?;
        }
        OutputFormat::Json => {
            let document = SelectionDocument::new(venue, &selection, Utc::now());
            output.write_json(&document)?;
        }
    }

    eprintln!();
    eprintln!("Team selected successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Players: {}", selection.team.len());
    eprintln!("  Fitness: {:.1}", selection.fitness);
    eprintln!("  Seed: {} (pass --seed {} to reproduce)", selection.seed, selection.seed);
    if let Some(last) = selection.history.last() {
        eprintln!("  Generations: {}", last.generation);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::{CommandArgs, Mode};

    fn parse(args: &[&str]) -> SelectArg {
        let args = ["xii", "select", "--data", "d.json", "--venue", "Eden Gardens"]
            .iter()
            .chain(args);
        match CommandArgs::parse_from(args).mode {
            Mode::Select(arg) => arg,
            Mode::Rank(_) => panic!("expected select"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = parse(&[
            "--squad",
            "A, B",
            "--strategy",
            "greedy",
            "--seed",
            "42",
            "--population",
            "6",
            "--allow-short-reserve",
            "--format",
            "json",
        ]);
        let config = arg.config().unwrap();
        assert_eq!(config.strategy, Strategy::Greedy);
        assert_eq!(config.seed, Some(SearchSeed(42)));
        assert_eq!(config.population_size, 6);
        assert_eq!(config.elite_count, 3);
        assert_eq!(config.validate(), Ok(()));
        assert!(config.rules.reserve_policy.is_best_effort());
        assert_eq!(arg.format, OutputFormat::Json);
        assert_eq!(arg.pool.squad().unwrap(), ["A", "B"]);
    }

    #[test]
    fn test_defaults_without_flags() {
        let arg = parse(&["--squad", "A"]);
        assert_eq!(arg.config().unwrap(), SearchConfig::default());
        assert_eq!(arg.format, OutputFormat::Text);
    }
}
