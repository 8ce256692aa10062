//! Constraint checking: validating team composition.
//!
//! Checks run in a fixed order and every failing check is reported:
//!
//! 1. the team has exactly `team_size` members
//! 2. no player appears twice
//! 3. at most `max_foreign` members are foreign
//! 4. at least `min_batters` members are batting candidates and at least
//!    `min_bowlers` members are bowling candidates (all-rounders count for both)
//!
//! The search repairs teams that fail these checks; violations are never surfaced to
//! callers as errors.

use std::collections::HashSet;

use xii_core::{PlayerPool, PoolIndex, Team, TeamRules};

/// A rule broken by a candidate team.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum ConstraintViolation {
    #[display("team has {actual} members, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
    #[display("player #{_0} selected more than once")]
    Duplicate(PoolIndex),
    #[display("{actual} foreign players, at most {max} allowed")]
    TooManyForeign { max: usize, actual: usize },
    #[display("{actual} batters, at least {min} required")]
    TooFewBatters { min: usize, actual: usize },
    #[display("{actual} bowlers, at least {min} required")]
    TooFewBowlers { min: usize, actual: usize },
}

/// Member counts of a team, by the categories the rules constrain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub size: usize,
    pub foreign: usize,
    pub batters: usize,
    pub bowlers: usize,
}

impl Composition {
    #[must_use]
    pub fn of(pool: &PlayerPool, members: &[PoolIndex]) -> Self {
        members.iter().fold(Self::default(), |mut c, &i| {
            c.size += 1;
            c.foreign += usize::from(pool.is_foreign(i));
            c.batters += usize::from(pool.is_batter(i));
            c.bowlers += usize::from(pool.is_bowler(i));
            c
        })
    }
}

/// Validates teams drawn from one pool against a set of [`TeamRules`].
///
/// # Example
///
/// ```
/// use xii_core::{BattingStats, Player, PlayerPool, PoolIndex, Team, TeamRules};
/// use xii_evaluator::constraint::{ConstraintChecker, ConstraintViolation};
///
/// let pool = PlayerPool::from_players(
///     vec![Player::new("A", "India").with_batting(BattingStats {
///         matches_played: 1,
///         runs: 1,
///         average: 1.0,
///     })],
///     "India",
/// );
/// let rules = TeamRules::default();
/// let checker = ConstraintChecker::new(&pool, &rules);
/// let team = Team::new(vec![PoolIndex(0)]);
/// assert!(!checker.is_valid(&team));
/// assert_eq!(
///     checker.violations(&team)[0],
///     ConstraintViolation::WrongSize { expected: 12, actual: 1 },
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstraintChecker<'a> {
    pool: &'a PlayerPool,
    rules: &'a TeamRules,
}

impl<'a> ConstraintChecker<'a> {
    #[must_use]
    pub fn new(pool: &'a PlayerPool, rules: &'a TeamRules) -> Self {
        Self { pool, rules }
    }

    #[must_use]
    pub fn rules(&self) -> &'a TeamRules {
        self.rules
    }

    #[must_use]
    pub fn is_valid(&self, team: &Team) -> bool {
        self.violations(team).is_empty()
    }

    /// Returns every rule `team` breaks, in check order.
    #[must_use]
    pub fn violations(&self, team: &Team) -> Vec<ConstraintViolation> {
        let rules = self.rules;
        let mut violations = vec![];

        if team.len() != rules.team_size {
            violations.push(ConstraintViolation::WrongSize {
                expected: rules.team_size,
                actual: team.len(),
            });
        }

        let mut seen = HashSet::with_capacity(team.len());
        let mut unique = Vec::with_capacity(team.len());
        for index in team.iter() {
            if seen.insert(index) {
                unique.push(index);
            } else {
                violations.push(ConstraintViolation::Duplicate(index));
            }
        }

        let composition = Composition::of(self.pool, &unique);
        if composition.foreign > rules.max_foreign {
            violations.push(ConstraintViolation::TooManyForeign {
                max: rules.max_foreign,
                actual: composition.foreign,
            });
        }
        if composition.batters < rules.min_batters {
            violations.push(ConstraintViolation::TooFewBatters {
                min: rules.min_batters,
                actual: composition.batters,
            });
        }
        if composition.bowlers < rules.min_bowlers {
            violations.push(ConstraintViolation::TooFewBowlers {
                min: rules.min_bowlers,
                actual: composition.bowlers,
            });
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use xii_core::{BattingStats, BowlingStats, Player};

    use super::*;

    fn batting() -> BattingStats {
        BattingStats {
            matches_played: 1,
            runs: 1,
            average: 1.0,
        }
    }

    fn bowling() -> BowlingStats {
        BowlingStats {
            matches_played: 1,
            runs_conceded: 1,
            balls_bowled: 6,
            economy: 1.0,
            wickets: 1,
            strike_rate: None,
        }
    }

    /// 0..7 domestic batters, 7..11 domestic bowlers, 11 domestic all-rounder,
    /// 12..17 foreign batters.
    fn pool() -> PlayerPool {
        let mut players = vec![];
        players.extend((0..7).map(|i| Player::new(format!("b{i}"), "India").with_batting(batting())));
        players.extend((0..4).map(|i| Player::new(format!("w{i}"), "India").with_bowling(bowling())));
        players.push(
            Player::new("ar", "India")
                .with_batting(batting())
                .with_bowling(bowling()),
        );
        players.extend(
            (0..5).map(|i| Player::new(format!("f{i}"), "Australia").with_batting(batting())),
        );
        PlayerPool::from_players(players, "India")
    }

    fn team(indices: impl IntoIterator<Item = usize>) -> Team {
        indices.into_iter().map(PoolIndex).collect()
    }

    #[test]
    fn test_valid_team() {
        let pool = pool();
        let rules = TeamRules::default();
        let checker = ConstraintChecker::new(&pool, &rules);
        assert!(checker.is_valid(&team(0..12)));
    }

    #[test]
    fn test_reports_all_violations_in_order() {
        let pool = pool();
        let rules = TeamRules::default();
        let checker = ConstraintChecker::new(&pool, &rules);
        // 5 foreign batters, a duplicate and no bowlers
        let violations = checker.violations(&team([12, 13, 14, 15, 16, 0, 0]));
        assert_eq!(
            violations,
            [
                ConstraintViolation::WrongSize {
                    expected: 12,
                    actual: 7
                },
                ConstraintViolation::Duplicate(PoolIndex(0)),
                ConstraintViolation::TooManyForeign { max: 4, actual: 5 },
                ConstraintViolation::TooFewBatters { min: 7, actual: 6 },
                ConstraintViolation::TooFewBowlers { min: 4, actual: 0 },
            ]
        );
    }

    #[test]
    fn test_all_rounder_counts_for_both_roles() {
        let pool = pool();
        let rules = TeamRules {
            team_size: 10,
            ..TeamRules::default()
        };
        let checker = ConstraintChecker::new(&pool, &rules);
        // 6 batters + all-rounder = 7 batting; 3 bowlers + all-rounder = 4 bowling
        let t = team([0, 1, 2, 3, 4, 5, 7, 8, 9, 11]);
        assert!(checker.is_valid(&t), "{:?}", checker.violations(&t));
        assert_eq!(
            Composition::of(&pool, t.members()),
            Composition {
                size: 10,
                foreign: 0,
                batters: 7,
                bowlers: 4
            }
        );
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            ConstraintViolation::TooManyForeign { max: 4, actual: 5 }.to_string(),
            "5 foreign players, at most 4 allowed"
        );
        assert_eq!(
            ConstraintViolation::Duplicate(PoolIndex(3)).to_string(),
            "player #3 selected more than once"
        );
    }
}
