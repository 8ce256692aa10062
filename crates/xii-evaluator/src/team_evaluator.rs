//! Team evaluation: fitness of a whole team.
//!
//! Team fitness is the sum of member scores. Scores are computed once per pool when
//! the [`TeamEvaluator`] is created, since a search scores the same players many times
//! per generation.

use xii_core::{PlayerPool, PoolIndex, Team};

use crate::player_evaluator::PlayerEvaluator;

/// Cached player scores of one pool.
#[derive(Debug, Clone)]
pub struct TeamEvaluator {
    scores: Vec<f32>,
}

impl TeamEvaluator {
    /// Scores every player of `pool` with `evaluator`.
    #[must_use]
    pub fn new<E>(evaluator: &E, pool: &PlayerPool) -> Self
    where
        E: PlayerEvaluator + ?Sized,
    {
        let scores = pool
            .players()
            .iter()
            .map(|p| evaluator.evaluate_player(p))
            .collect();
        Self { scores }
    }

    /// Scores of all pool members, indexed by [`PoolIndex`].
    #[must_use]
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    #[must_use]
    pub fn score(&self, index: PoolIndex) -> f32 {
        self.scores[index.0]
    }

    /// Returns the team fitness (sum of member scores).
    #[must_use]
    pub fn fitness(&self, team: &Team) -> f32 {
        team.iter().map(|i| self.score(i)).sum()
    }

    /// Returns pool members sorted by score, best first.
    ///
    /// Ties keep pool order.
    #[must_use]
    pub fn ranking(&self) -> Vec<PoolIndex> {
        let mut indices: Vec<PoolIndex> = (0..self.scores.len()).map(PoolIndex).collect();
        indices.sort_by(|a, b| self.score(*b).total_cmp(&self.score(*a)));
        indices
    }
}
