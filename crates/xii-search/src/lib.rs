//! Team search: selecting the Playing XII from a candidate pool.
//!
//! This crate turns a [`PlayerPool`] into the highest-fitness team that passes the
//! [`ConstraintChecker`]. Two strategies are available:
//!
//! - **Genetic** ([`genetic`]) - evolves a population of valid teams with elitism,
//!   single-point crossover, mutation and repair
//! - **Greedy** ([`greedy`]) - takes the best players by score, role minimums first
//!
//! # How Selection Works
//!
//! 1. **Pool** - Filter the dataset to the squad and venue ([`PlayerPool::build`])
//! 2. **Rules** - Check the role minimums and resolve the reachable team size
//!    ([`TeamRules::fit_to_pool`])
//! 3. **Scores** - Score every pool member once ([`TeamEvaluator`])
//! 4. **Search** - Run the configured strategy with a seeded generator
//! 5. **Sheet** - Render the winning team as a [`TeamSheet`]
//!
//! # Architecture
//!
//! ```text
//! select_team
//!     ↓ builds
//! PlayerPool (xii-core)
//!     ↓ searched by
//! TeamSearch ── SearchConfig
//!     ↓ uses
//! genetic / greedy
//!     ↓ built from
//! roster (random, crossover, mutate, repair)
//!     ↓ checked and scored by
//! ConstraintChecker + TeamEvaluator (xii-evaluator)
//! ```
//!
//! # Reproducibility
//!
//! All randomness comes from one [`rand_pcg::Pcg32`] seeded from
//! [`SearchSeed`](config::SearchSeed). A search without a configured seed draws one
//! and reports it in [`Selection::seed`] and the log, so any run can be replayed. A
//! run stopped by the time budget depends on machine speed and is only reproducible
//! if the budget is not reached.
//!
//! # Example
//!
//! ```
//! use xii_core::{BattingRecord, BowlingRecord, Dataset};
//! use xii_search::{
//!     config::{SearchConfig, SearchSeed},
//!     select_team,
//! };
//!
//! let batting = (0..9)
//!     .map(|i| BattingRecord {
//!         player: format!("Batter {i}"),
//!         p_id: None,
//!         venue: "Wankhede".into(),
//!         country: "India".into(),
//!         matches_played: 5,
//!         total_runs: 100 + 10 * i,
//!         batting_average: 25.0,
//!     })
//!     .collect();
//! let bowling = (0..5)
//!     .map(|i| BowlingRecord {
//!         player: format!("Bowler {i}"),
//!         p_id: None,
//!         venue: "Wankhede".into(),
//!         country: "India".into(),
//!         matches_played: 5,
//!         total_runs_conceded: 150,
//!         balls_bowled: 120,
//!         economy: 7.5,
//!         total_wickets: 4 + i,
//!         bowling_strike_rate: None,
//!     })
//!     .collect();
//! let dataset = Dataset { batting, bowling };
//! let squad: Vec<String> = (0..9)
//!     .map(|i| format!("Batter {i}"))
//!     .chain((0..5).map(|i| format!("Bowler {i}")))
//!     .collect();
//!
//! let config = SearchConfig { seed: Some(SearchSeed(42)), ..SearchConfig::default() };
//! let selection = select_team(&dataset, &squad, "Wankhede", &config).unwrap();
//! assert_eq!(selection.sheet.entries.len(), 12);
//! assert_eq!(selection.seed, SearchSeed(42));
//! ```

use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng as _;
use xii_core::{Dataset, InsufficientDataError, PlayerPool, Team, TeamRules, TeamSheet};
use xii_evaluator::{
    constraint::ConstraintChecker,
    player_evaluator::{PlayerEvaluator, WeightedPlayerEvaluator},
    team_evaluator::TeamEvaluator,
};

use self::{
    config::{ConfigError, SearchConfig, SearchSeed, Strategy},
    genetic::{GenerationStats, Population, PopulationEvolver},
};

pub mod config;
pub mod genetic;
pub mod greedy;
pub mod roster;

/// The search ended with no candidate left in its population.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("search exhausted: generation {generation} has no valid team")]
pub struct SearchExhaustedError {
    pub generation: usize,
}

/// Why a selection failed.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SelectionError {
    #[display("not enough data: {_0}")]
    InsufficientData(InsufficientDataError),
    #[display("search failed: {_0}")]
    SearchExhausted(SearchExhaustedError),
    #[display("invalid configuration: {_0}")]
    InvalidConfig(ConfigError),
}

/// What the search operators share: the pool, the effective rules and the scores.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub pool: &'a PlayerPool,
    pub rules: &'a TeamRules,
    pub evaluator: &'a TeamEvaluator,
}

impl<'a> SearchContext<'a> {
    #[must_use]
    pub fn checker(&self) -> ConstraintChecker<'a> {
        ConstraintChecker::new(self.pool, self.rules)
    }
}

/// The outcome of a successful search.
#[derive(Debug, Clone)]
pub struct Selection {
    pub team: Team,
    pub fitness: f32,
    pub sheet: TeamSheet,
    /// Seed that reproduces this selection
    pub seed: SearchSeed,
    pub strategy: Strategy,
    /// Rules the team satisfies (team size may be reduced under a best-effort
    /// reserve policy)
    pub rules: TeamRules,
    /// Fitness summary per generation; empty for the greedy strategy
    pub history: Vec<GenerationStats>,
}

/// A configured search over one pool.
#[derive(Debug)]
pub struct TeamSearch<'a> {
    pool: &'a PlayerPool,
    config: SearchConfig,
    rules: TeamRules,
    evaluator: TeamEvaluator,
}

impl<'a> TeamSearch<'a> {
    /// Prepares a search scoring players with the configured weights.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidConfig`] for out-of-range settings and
    /// [`SelectionError::InsufficientData`] when the pool cannot field a team under
    /// the configured rules.
    pub fn new(pool: &'a PlayerPool, config: SearchConfig) -> Result<Self, SelectionError> {
        let evaluator = WeightedPlayerEvaluator::new(config.weights.clone());
        Self::with_evaluator(pool, config, &evaluator)
    }

    /// Prepares a search scoring players with `evaluator`.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn with_evaluator<E>(
        pool: &'a PlayerPool,
        config: SearchConfig,
        evaluator: &E,
    ) -> Result<Self, SelectionError>
    where
        E: PlayerEvaluator + ?Sized,
    {
        config.validate()?;
        pool.ensure_role_minimums(&config.rules)?;

        let selectable = pool.selectable_count(config.rules.max_foreign);
        let rules = config.rules.fit_to_pool(selectable).ok_or(
            InsufficientDataError::TooFewPlayers {
                selectable,
                required: config.rules.team_size,
            },
        )?;
        if rules.team_size < config.rules.team_size {
            warn!(
                "only {selectable} selectable players; selecting {} without a full reserve",
                rules.team_size
            );
        }

        Ok(Self {
            pool,
            evaluator: TeamEvaluator::new(evaluator, pool),
            config,
            rules,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The rules in effect for this pool.
    #[must_use]
    pub fn rules(&self) -> &TeamRules {
        &self.rules
    }

    #[must_use]
    pub fn evaluator(&self) -> &TeamEvaluator {
        &self.evaluator
    }

    fn context(&self) -> SearchContext<'_> {
        SearchContext {
            pool: self.pool,
            rules: &self.rules,
            evaluator: &self.evaluator,
        }
    }

    /// Runs the search with the configured seed, or a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InsufficientData`] when no valid initial team can be
    /// built and [`SelectionError::SearchExhausted`] when a generation ends empty.
    pub fn run(&self) -> Result<Selection, SelectionError> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        self.run_with_seed(seed)
    }

    /// Runs the search with `seed`.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub fn run_with_seed(&self, seed: SearchSeed) -> Result<Selection, SelectionError> {
        info!("{} search with seed {seed}", self.config.strategy);
        let ctx = self.context();
        let mut rng = seed.rng();

        let (team, history) = match self.config.strategy {
            Strategy::Genetic => self.evolve(&ctx, &mut rng)?,
            Strategy::Greedy => {
                let team = greedy::select(&ctx, &mut rng).ok_or_else(|| self.no_valid_team())?;
                (team, vec![])
            }
        };
        debug_assert!(ctx.checker().is_valid(&team));

        let fitness = self.evaluator.fitness(&team);
        let sheet = TeamSheet::new(self.pool, &team, self.evaluator.scores(), &self.rules);
        info!("selected {} players with fitness {fitness:.1}", team.len());
        Ok(Selection {
            team,
            fitness,
            sheet,
            seed,
            strategy: self.config.strategy,
            rules: self.rules.clone(),
            history,
        })
    }

    fn evolve(
        &self,
        ctx: &SearchContext<'_>,
        rng: &mut rand_pcg::Pcg32,
    ) -> Result<(Team, Vec<GenerationStats>), SelectionError> {
        let config = &self.config;
        let started = Instant::now();
        let evolver = PopulationEvolver {
            elite_count: config.elite_count,
            population_size: config.population_size,
            mutation_rate: config.mutation_rate,
            crossover_point: config.crossover_point,
            init_attempts: config.init_attempts,
        };

        let mut population =
            Population::random(ctx, config.population_size, config.init_attempts, rng);
        let Some(stats) = GenerationStats::new(0, &population) else {
            return Err(self.no_valid_team().into());
        };
        let mut history = vec![stats];

        for generation in 1..=config.generations {
            if config.time_budget().is_some_and(|budget| started.elapsed() >= budget) {
                info!("time budget spent after {} generations", generation - 1);
                break;
            }
            population = evolver.evolve(ctx, &population, rng);
            let Some(stats) = GenerationStats::new(generation, &population) else {
                return Err(SearchExhaustedError { generation }.into());
            };
            debug!(
                "generation {generation}: best {:.1}, mean {:.1}, worst {:.1} ({} teams)",
                stats.best, stats.mean, stats.worst, stats.population
            );
            history.push(stats);
        }

        let best = population.best().cloned().ok_or(SearchExhaustedError {
            generation: history.len(),
        })?;
        Ok((best.into_team(), history))
    }

    fn no_valid_team(&self) -> InsufficientDataError {
        InsufficientDataError::NoValidTeam {
            players: self.pool.len(),
        }
    }
}

/// Selects a team for `squad` at `venue` from `dataset`.
///
/// # Errors
///
/// Returns [`SelectionError`] when the configuration is invalid, the data cannot
/// support a team, or the search runs out of candidates.
pub fn select_team<I, S>(
    dataset: &Dataset,
    squad: I,
    venue: &str,
    config: &SearchConfig,
) -> Result<Selection, SelectionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // reject a bad configuration before building the pool
    config.validate()?;
    let query = config.pool_query(squad, venue);
    let pool = PlayerPool::build(dataset, &query, &config.rules)?;
    select_from_pool(&pool, config)
}

/// Selects a team from an already built pool.
///
/// # Errors
///
/// See [`select_team`].
pub fn select_from_pool(pool: &PlayerPool, config: &SearchConfig) -> Result<Selection, SelectionError> {
    TeamSearch::new(pool, config.clone())?.run()
}

#[cfg(test)]
mod tests {
    use xii_core::{BattingStats, BowlingStats, Player, ReservePolicy};

    use super::*;

    fn pool(batters: usize, bowlers: usize) -> PlayerPool {
        let mut players: Vec<Player> = (0..batters)
            .map(|i| {
                Player::new(format!("bat{i}"), "India").with_batting(BattingStats {
                    matches_played: 3,
                    runs: 30,
                    average: 10.0,
                })
            })
            .collect();
        players.extend((0..bowlers).map(|i| {
            Player::new(format!("bowl{i}"), "India").with_bowling(BowlingStats {
                matches_played: 3,
                runs_conceded: 90,
                balls_bowled: 72,
                economy: 7.5,
                wickets: 3,
                strike_rate: None,
            })
        }));
        PlayerPool::from_players(players, "India")
    }

    #[test]
    fn test_rejects_invalid_config() {
        let pool = pool(8, 4);
        let config = SearchConfig {
            elite_count: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            TeamSearch::new(&pool, config),
            Err(SelectionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_best_effort_reduces_team_size() {
        let pool = pool(7, 4);
        let config = SearchConfig {
            rules: TeamRules {
                reserve_policy: ReservePolicy::BestEffort,
                ..TeamRules::default()
            },
            ..SearchConfig::default()
        };
        let search = TeamSearch::new(&pool, config).unwrap();
        assert_eq!(search.rules().team_size, 11);
    }

    #[test]
    fn test_history_covers_every_generation() {
        let pool = pool(10, 6);
        let config = SearchConfig {
            generations: 7,
            seed: Some(SearchSeed(3)),
            ..SearchConfig::default()
        };
        let selection = select_from_pool(&pool, &config).unwrap();
        assert_eq!(selection.history.len(), 8);
        assert_eq!(selection.history[7].generation, 7);
        assert_eq!(selection.fitness, selection.sheet.fitness);
    }

    #[test]
    fn test_error_messages() {
        let err = SelectionError::from(SearchExhaustedError { generation: 4 });
        assert_eq!(
            err.to_string(),
            "search failed: search exhausted: generation 4 has no valid team"
        );
        let err = SelectionError::from(InsufficientDataError::Bowlers {
            found: 2,
            required: 4,
        });
        assert!(err.to_string().starts_with("not enough data: "));
    }
}
