//! Search configuration.
//!
//! [`SearchConfig`] deserializes with every field optional, so a JSON document only
//! needs the settings it changes:
//!
//! ```
//! use xii_search::config::{SearchConfig, Strategy};
//!
//! let config: SearchConfig =
//!     serde_json::from_str(r#"{ "strategy": "greedy", "rules": { "max_foreign": 3 } }"#)
//!         .unwrap();
//! assert_eq!(config.strategy, Strategy::Greedy);
//! assert_eq!(config.rules.max_foreign, 3);
//! assert_eq!(config.generations, 50);
//! ```

use std::time::Duration;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use xii_core::{PoolQuery, TeamRules, VenueMatch};
use xii_evaluator::player_evaluator::EvaluatorWeights;

/// Which search strategy selects the team.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Population-based genetic search.
    #[default]
    #[display("genetic")]
    Genetic,
    /// Best players by score, role minimums first.
    #[display("greedy")]
    Greedy,
}

/// Where single-point crossover splits the parents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverPoint {
    /// Half the team size.
    #[default]
    Midpoint,
    /// A random interior index, drawn per child.
    Random,
}

/// Seed of the search's pseudo-random generator.
///
/// Every stochastic step of a search draws from one generator seeded with this
/// value, so the same pool, configuration and seed always select the same team.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use xii_search::config::SearchSeed;
///
/// let seed: SearchSeed = rand::rng().random();
/// let mut a = seed.rng();
/// let mut b = seed.rng();
/// assert_eq!(a.random::<u32>(), b.random::<u32>());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
pub struct SearchSeed(pub u64);

impl SearchSeed {
    /// Creates the generator for this seed.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::seed_from_u64(self.0)
    }
}

impl Distribution<SearchSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchSeed {
        SearchSeed(rng.random())
    }
}

/// Settings of one team selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Candidates per generation
    pub population_size: usize,
    /// Top candidates kept unchanged as breeding stock
    pub elite_count: usize,
    pub generations: usize,
    /// Probability that a child gets one slot replaced
    pub mutation_rate: f32,
    pub crossover_point: CrossoverPoint,
    /// Tries per candidate when building a random team
    pub init_attempts: usize,
    pub rules: TeamRules,
    pub weights: EvaluatorWeights,
    pub home_nation: String,
    pub venue_match: VenueMatch,
    /// Drawn from the OS when absent
    pub seed: Option<SearchSeed>,
    /// Wall-clock limit; generations stop early once it is spent
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Genetic,
            population_size: 20,
            elite_count: 10,
            generations: 50,
            mutation_rate: 0.2,
            crossover_point: CrossoverPoint::Midpoint,
            init_attempts: 16,
            rules: TeamRules::default(),
            weights: EvaluatorWeights::default(),
            home_nation: PoolQuery::DEFAULT_HOME_NATION.to_owned(),
            venue_match: VenueMatch::Exact,
            seed: None,
            time_budget_ms: None,
        }
    }
}

/// A configuration value outside its valid range.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("elite count {elite_count} must be between 1 and the population size {population_size}")]
    EliteCount {
        elite_count: usize,
        population_size: usize,
    },
    #[display("elite count {elite_count} leaves no offspring slots in a population of {population_size}")]
    NoOffspring {
        elite_count: usize,
        population_size: usize,
    },
    #[display("mutation rate {rate} must be between 0 and 1")]
    MutationRate { rate: f32 },
    #[display("init attempts must be at least 1")]
    NoInitAttempts,
    #[display(
        "team size {team_size} cannot hold {min_batters} batters or {min_bowlers} bowlers"
    )]
    TeamSize {
        team_size: usize,
        min_batters: usize,
        min_bowlers: usize,
    },
}

impl SearchConfig {
    /// Checks that every setting is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.elite_count == 0 || self.elite_count > self.population_size {
            return Err(ConfigError::EliteCount {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if self.elite_count == self.population_size {
            return Err(ConfigError::NoOffspring {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate {
                rate: self.mutation_rate,
            });
        }
        if self.init_attempts == 0 {
            return Err(ConfigError::NoInitAttempts);
        }
        let rules = &self.rules;
        if rules.team_size == 0 || rules.team_size < rules.min_batters.max(rules.min_bowlers) {
            return Err(ConfigError::TeamSize {
                team_size: rules.team_size,
                min_batters: rules.min_batters,
                min_bowlers: rules.min_bowlers,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Builds the pool query for `squad` at `venue` with this configuration's home
    /// nation and venue matching.
    pub fn pool_query<I, S>(&self, squad: I, venue: &str) -> PoolQuery
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PoolQuery::new(squad, venue)
            .with_home_nation(self.home_nation.clone())
            .with_venue_match(self.venue_match)
    }
}
