//! Player evaluation: scoring a single candidate.
//!
//! # Formula
//!
//! ```text
//! score = runs · w_runs + batting_average · w_average              (batting block present)
//!       + wickets · w_wickets + (economy_cap − economy) · w_economy  (bowling block present)
//! ```
//!
//! A missing stat block contributes nothing. In particular the economy term is only
//! applied to players that actually bowled: a pure batter is not credited with a
//! perfect economy rate.
//!
//! # Weights
//!
//! | weight        | default |
//! |---------------|---------|
//! | `runs`        | 1.5     |
//! | `average`     | 2.0     |
//! | `wickets`     | 3.0     |
//! | `economy`     | 1.5     |
//! | `economy_cap` | 100.0   |

use std::fmt;

use serde::{Deserialize, Serialize};
use xii_core::Player;

/// Scores players (higher is better).
pub trait PlayerEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a player and returns a score.
    ///
    /// Implementations must be deterministic: equal inputs give equal scores.
    fn evaluate_player(&self, player: &Player) -> f32;
}

/// Coefficients of the linear player score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorWeights {
    /// Weight per run scored
    pub runs: f32,
    /// Weight per point of batting average
    pub average: f32,
    /// Weight per wicket taken
    pub wickets: f32,
    /// Weight per point of economy below `economy_cap`
    pub economy: f32,
    /// Economy rate that scores zero on the economy term
    pub economy_cap: f32,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            runs: 1.5,
            average: 2.0,
            wickets: 3.0,
            economy: 1.5,
            economy_cap: 100.0,
        }
    }
}

/// Linear player evaluator over [`EvaluatorWeights`].
///
/// # Example
///
/// ```
/// use xii_core::{BowlingStats, Player};
/// use xii_evaluator::player_evaluator::{PlayerEvaluator, WeightedPlayerEvaluator};
///
/// let bowler = Player::new("J. Bumrah", "India").with_bowling(BowlingStats {
///     matches_played: 8,
///     runs_conceded: 200,
///     balls_bowled: 192,
///     economy: 6.0,
///     wickets: 10,
///     strike_rate: None,
/// });
/// // 10 · 3.0 + (100 − 6) · 1.5
/// assert_eq!(WeightedPlayerEvaluator::default().evaluate_player(&bowler), 171.0);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeightedPlayerEvaluator {
    weights: EvaluatorWeights,
}

impl WeightedPlayerEvaluator {
    #[must_use]
    pub fn new(weights: EvaluatorWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &EvaluatorWeights {
        &self.weights
    }
}

impl PlayerEvaluator for WeightedPlayerEvaluator {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_player(&self, player: &Player) -> f32 {
        let w = &self.weights;
        let batting = player
            .batting()
            .map_or(0.0, |b| b.runs as f32 * w.runs + b.average * w.average);
        let bowling = player.bowling().map_or(0.0, |b| {
            b.wickets as f32 * w.wickets + (w.economy_cap - b.economy) * w.economy
        });
        batting + bowling
    }
}
