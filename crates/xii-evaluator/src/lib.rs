//! Evaluation system for scoring players and validating teams.
//!
//! This crate implements the three pure functions the team search depends on:
//!
//! 1. **Player Evaluation** ([`player_evaluator`]) - Scores a single player from their
//!    batting and bowling statistics using a weighted linear combination.
//!
//! 2. **Team Evaluation** ([`team_evaluator`]) - Caches player scores for a pool and
//!    computes team fitness as the sum of member scores.
//!
//! 3. **Constraint Checking** ([`constraint`]) - Validates a team against the composition
//!    rules (size, uniqueness, foreign-player cap, role minimums).
//!
//! # Architecture
//!
//! ```text
//! Team Search (fitness + validity)
//!     ↓ uses
//! Team Evaluator ── Constraint Checker
//!     ↓ uses
//! Player Evaluator
//! ```
//!
//! # Design Principles
//!
//! ## Deterministic Scoring
//!
//! Player scores depend on the player's statistics and the weights only. Scoring the
//! same player twice yields the same value, which is what makes seeded searches
//! reproducible.
//!
//! ## Linear Evaluation Model
//!
//! A player's score is a weighted sum of statistics. It is simple, interpretable, and
//! tunable through [`player_evaluator::EvaluatorWeights`] without touching the search,
//! but it cannot capture interactions such as batting-order balance or bowling variety.
//!
//! # Example
//!
//! ```
//! use xii_core::{BattingStats, Player, PlayerPool};
//! use xii_evaluator::{
//!     player_evaluator::WeightedPlayerEvaluator, team_evaluator::TeamEvaluator,
//! };
//!
//! let pool = PlayerPool::from_players(
//!     vec![Player::new("A", "India").with_batting(BattingStats {
//!         matches_played: 2,
//!         runs: 100,
//!         average: 50.0,
//!     })],
//!     "India",
//! );
//! let evaluator = TeamEvaluator::new(&WeightedPlayerEvaluator::default(), &pool);
//! assert_eq!(evaluator.scores(), &[250.0]);
//! ```

pub mod constraint;
pub mod player_evaluator;
pub mod team_evaluator;
