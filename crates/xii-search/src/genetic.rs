//! Genetic algorithm over candidate teams.
//!
//! This module evolves populations of teams towards maximum fitness. Every individual
//! in a population is a valid team: children are repaired before they are scored, so
//! the best individual of any generation can be returned as the selection.
//!
//! # Algorithm Overview
//!
//! 1. **Initialize** - Build random valid teams ([`Population::random`])
//! 2. **Select** - Rank by fitness (stable) and keep the top `elite_count` unchanged
//! 3. **Recombine** - Pick two elite parents and apply single-point crossover
//! 4. **Mutate** - Swap one member for a random non-member with probability
//!    `mutation_rate`
//! 5. **Repair** - Restore the team rules; unrepairable children are replaced by a
//!    fresh random team or dropped
//!
//! # Key Components
//!
//! - [`Individual`] - A team with its fitness
//! - [`Population`] - Individuals of one generation, best first
//! - [`PopulationEvolver`] - Evolution parameters and the generation step
//! - [`GenerationStats`] - Fitness summary of one generation
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use xii_core::{BattingStats, BowlingStats, Player, PlayerPool, TeamRules};
//! use xii_evaluator::{player_evaluator::WeightedPlayerEvaluator, team_evaluator::TeamEvaluator};
//! use xii_search::{
//!     SearchContext,
//!     config::CrossoverPoint,
//!     genetic::{Population, PopulationEvolver},
//! };
//!
//! let batting = BattingStats { matches_played: 2, runs: 60, average: 30.0 };
//! let bowling = BowlingStats {
//!     matches_played: 2, runs_conceded: 60, balls_bowled: 48,
//!     economy: 7.5, wickets: 3, strike_rate: None,
//! };
//! let mut players: Vec<Player> = (0..9)
//!     .map(|i| Player::new(format!("bat{i}"), "India").with_batting(batting.clone()))
//!     .collect();
//! players.extend((0..6).map(|i| Player::new(format!("bowl{i}"), "India").with_bowling(bowling.clone())));
//! let pool = PlayerPool::from_players(players, "India");
//! let rules = TeamRules::default();
//! let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::default(), &pool);
//! let ctx = SearchContext { pool: &pool, rules: &rules, evaluator: &evaluator };
//!
//! let mut rng = Pcg32::seed_from_u64(7);
//! let mut population = Population::random(&ctx, 8, 4, &mut rng);
//! let evolver = PopulationEvolver {
//!     elite_count: 4,
//!     population_size: 8,
//!     mutation_rate: 0.2,
//!     crossover_point: CrossoverPoint::Midpoint,
//!     init_attempts: 4,
//! };
//! for _ in 0..5 {
//!     population = evolver.evolve(&ctx, &population, &mut rng);
//! }
//! assert_eq!(population.best().unwrap().team().len(), 12);
//! ```
//!
//! # Current Limitations
//!
//! - **Elite-only parents**: Parents are drawn uniformly from the elite; there is no
//!   fitness-proportional or tournament selection
//! - **No diversity maintenance**: Identical teams may fill the elite once the
//!   population converges
//! - **Fixed parameters**: Mutation rate and elite size do not adapt over generations

use log::warn;
use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;
use xii_core::Team;
use xii_stats::descriptive::DescriptiveStats;

use crate::{SearchContext, config::CrossoverPoint, roster};

/// A candidate team and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    team: Team,
    fitness: f32,
}

impl Individual {
    /// Scores `team` in `ctx`.
    #[must_use]
    pub fn new(ctx: &SearchContext<'_>, team: Team) -> Self {
        let fitness = ctx.evaluator.fitness(&team);
        Self { team, fitness }
    }

    /// Builds a random valid individual, trying up to `attempts` times.
    pub fn random<R>(ctx: &SearchContext<'_>, attempts: usize, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        (0..attempts)
            .find_map(|_| roster::random(ctx.pool, ctx.rules, rng))
            .map(|team| Self::new(ctx, team))
    }

    #[must_use]
    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Returns the sum of member scores.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    #[must_use]
    pub fn into_team(self) -> Team {
        self.team
    }
}

/// Individuals of one generation, sorted by fitness descending.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of up to `count` random valid individuals.
    ///
    /// Each individual gets `attempts` tries; individuals that cannot be built are
    /// left out, so the result may be smaller than `count` or empty.
    pub fn random<R>(ctx: &SearchContext<'_>, count: usize, attempts: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals: Vec<Individual> = (0..count)
            .filter_map(|_| Individual::random(ctx, attempts, rng))
            .collect();
        if individuals.len() < count {
            warn!(
                "built {} of {count} initial teams; the rest could not be completed",
                individuals.len()
            );
        }
        Self::from_individuals(individuals)
    }

    /// Ranks `individuals` into a population.
    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        let mut population = Self { individuals };
        population.rank();
        population
    }

    // stable: ties keep their relative order
    fn rank(&mut self) {
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The fittest individual; the first one on ties.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Computes descriptive statistics for fitness across all individuals.
    ///
    /// Returns `None` for an empty population.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.individuals.iter().map(|ind| ind.fitness))
    }
}

/// Controls how one generation becomes the next.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged and used as parents
    pub elite_count: usize,
    /// Target size of the next generation
    pub population_size: usize,
    /// Probability of mutating a child
    pub mutation_rate: f32,
    pub crossover_point: CrossoverPoint,
    /// Tries for a fresh random team when a child cannot be repaired
    pub init_attempts: usize,
}

impl PopulationEvolver {
    /// Evolves `population` into the next generation.
    ///
    /// 1. Keeps the top `elite_count` individuals unchanged
    /// 2. Fills the remaining slots with repaired children of elite parents
    /// 3. Ranks the result
    ///
    /// The next generation holds at most `population_size` individuals; slots whose
    /// child cannot be repaired or replaced stay empty.
    ///
    /// # Panics
    ///
    /// Panics if `mutation_rate` is not in `[0, 1]`.
    #[must_use]
    pub fn evolve<R>(
        &self,
        ctx: &SearchContext<'_>,
        population: &Population,
        rng: &mut R,
    ) -> Population
    where
        R: Rng + ?Sized,
    {
        debug_assert!(
            population
                .individuals
                .is_sorted_by(|a, b| a.fitness >= b.fitness)
        );

        let elite_count = self.elite_count.min(population.len());
        let elite = &population.individuals[..elite_count];
        if elite.is_empty() {
            return Population::default();
        }
        let mut next: Vec<Individual> = elite.to_vec();

        let mut dropped = 0;
        while next.len() + dropped < self.population_size {
            let (a, b) = select_parents(elite, rng);
            let split = self.split_point(ctx.rules.team_size, rng);
            let mut child = roster::crossover(a.team.members(), b.team.members(), split);
            roster::mutate(ctx.pool, &mut child, self.mutation_rate, rng);

            let child = roster::repair(ctx.pool, ctx.rules, child, rng)
                .map(|team| Individual::new(ctx, team))
                .or_else(|| Individual::random(ctx, self.init_attempts, rng));
            match child {
                Some(child) => next.push(child),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!("dropped {dropped} children that could not be repaired or replaced");
        }

        Population::from_individuals(next)
    }

    fn split_point<R>(&self, team_size: usize, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        match self.crossover_point {
            CrossoverPoint::Midpoint => team_size / 2,
            CrossoverPoint::Random if team_size > 1 => rng.random_range(1..team_size),
            CrossoverPoint::Random => 0,
        }
    }
}

/// Picks two distinct elite parents, or the only one twice.
fn select_parents<'a, R>(elite: &'a [Individual], rng: &mut R) -> (&'a Individual, &'a Individual)
where
    R: Rng + ?Sized,
{
    let mut parents = elite.choose_multiple(rng, 2);
    let a = parents.next().unwrap_or(&elite[0]);
    let b = parents.next().unwrap_or(a);
    (a, b)
}

/// Fitness summary of one generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub population: usize,
    pub best: f32,
    pub mean: f32,
    pub worst: f32,
    pub std_dev: f32,
}

impl GenerationStats {
    /// Summarizes `population`; `None` when it is empty.
    #[must_use]
    pub fn new(generation: usize, population: &Population) -> Option<Self> {
        let stats = population.compute_fitness_stats()?;
        Some(Self {
            generation,
            population: stats.count,
            best: stats.max,
            mean: stats.mean,
            worst: stats.min,
            std_dev: stats.std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use xii_core::{BattingStats, BowlingStats, Player, PlayerPool, TeamRules};
    use xii_evaluator::{
        constraint::ConstraintChecker, player_evaluator::WeightedPlayerEvaluator,
        team_evaluator::TeamEvaluator,
    };

    use super::*;

    fn pool() -> PlayerPool {
        let mut players: Vec<Player> = (0..10)
            .map(|i| {
                Player::new(format!("bat{i}"), if i < 7 { "India" } else { "Australia" })
                    .with_batting(BattingStats {
                        matches_played: 4,
                        runs: 40 * (i + 1),
                        average: 20.0,
                    })
            })
            .collect();
        players.extend((0..7).map(|i| {
            Player::new(format!("bowl{i}"), if i < 5 { "India" } else { "Australia" })
                .with_bowling(BowlingStats {
                    matches_played: 4,
                    runs_conceded: 120,
                    balls_bowled: 96,
                    economy: 7.5,
                    wickets: i + 1,
                    strike_rate: None,
                })
        }));
        PlayerPool::from_players(players, "India")
    }

    fn evolver() -> PopulationEvolver {
        PopulationEvolver {
            elite_count: 5,
            population_size: 12,
            mutation_rate: 0.3,
            crossover_point: CrossoverPoint::Random,
            init_attempts: 8,
        }
    }

    #[test]
    fn test_population_is_ranked_and_valid() {
        let pool = pool();
        let rules = TeamRules::default();
        let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::default(), &pool);
        let ctx = SearchContext {
            pool: &pool,
            rules: &rules,
            evaluator: &evaluator,
        };
        let checker = ConstraintChecker::new(&pool, &rules);
        let population = Population::random(&ctx, 12, 8, &mut Pcg32::seed_from_u64(0));

        assert_eq!(population.len(), 12);
        assert!(
            population
                .individuals()
                .is_sorted_by(|a, b| a.fitness() >= b.fitness())
        );
        for ind in population.individuals() {
            assert!(checker.is_valid(ind.team()));
            assert_eq!(ind.fitness(), evaluator.fitness(ind.team()));
        }
    }

    #[test]
    fn test_evolve_keeps_elite() {
        let pool = pool();
        let rules = TeamRules::default();
        let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::default(), &pool);
        let ctx = SearchContext {
            pool: &pool,
            rules: &rules,
            evaluator: &evaluator,
        };
        let checker = ConstraintChecker::new(&pool, &rules);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut population = Population::random(&ctx, 12, 8, &mut rng);
        let evolver = evolver();

        for _ in 0..10 {
            let best = population.best().unwrap().fitness();
            let next = evolver.evolve(&ctx, &population, &mut rng);
            assert_eq!(next.len(), 12);
            assert!(next.best().unwrap().fitness() >= best);
            for elite in &population.individuals()[..5] {
                assert!(next.individuals().contains(elite));
            }
            assert!(next.individuals().iter().all(|ind| checker.is_valid(ind.team())));
            population = next;
        }
    }

    #[test]
    fn test_evolve_empty_population() {
        let pool = pool();
        let rules = TeamRules::default();
        let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::default(), &pool);
        let ctx = SearchContext {
            pool: &pool,
            rules: &rules,
            evaluator: &evaluator,
        };
        let next = evolver().evolve(&ctx, &Population::default(), &mut Pcg32::seed_from_u64(0));
        assert!(next.is_empty());
        assert!(GenerationStats::new(1, &next).is_none());
    }

    #[test]
    fn test_generation_stats() {
        let pool = pool();
        let rules = TeamRules::default();
        let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::default(), &pool);
        let ctx = SearchContext {
            pool: &pool,
            rules: &rules,
            evaluator: &evaluator,
        };
        let population = Population::random(&ctx, 6, 8, &mut Pcg32::seed_from_u64(5));
        let stats = GenerationStats::new(0, &population).unwrap();
        assert_eq!(stats.population, 6);
        assert_eq!(stats.best, population.best().unwrap().fitness());
        assert!(stats.worst <= stats.best);
    }
}
