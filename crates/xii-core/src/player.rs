//! Candidate players and their role-specific statistics.

use serde::{Deserialize, Serialize};

/// Batting figures of one player at one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingStats {
    pub matches_played: u32,
    pub runs: u32,
    pub average: f32,
}

/// Bowling figures of one player at one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingStats {
    pub matches_played: u32,
    pub runs_conceded: u32,
    pub balls_bowled: u32,
    pub economy: f32,
    pub wickets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f32>,
}

/// Role of a player, derived from which stat blocks are present.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[display("batter")]
    Batter,
    #[display("all-rounder")]
    AllRounder,
    #[display("bowler")]
    Bowler,
}

/// A candidate player.
///
/// A player carries an optional batting block and an optional bowling block; at least
/// one is present for every player admitted to a [`PlayerPool`](crate::PlayerPool).
///
/// # Example
///
/// ```
/// use xii_core::{BattingStats, Player, Role};
///
/// let player = Player::new("R. Sharma", "India").with_batting(BattingStats {
///     matches_played: 12,
///     runs: 410,
///     average: 37.3,
/// });
/// assert_eq!(player.role(), Some(Role::Batter));
/// assert!(!player.is_foreign("India"));
/// assert!(player.is_foreign("Australia"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    id: Option<u32>,
    nationality: String,
    batting: Option<BattingStats>,
    bowling: Option<BowlingStats>,
}

impl Player {
    /// Creates a player with no statistics.
    pub fn new(name: impl Into<String>, nationality: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            nationality: nationality.into(),
            batting: None,
            bowling: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_batting(mut self, stats: BattingStats) -> Self {
        self.batting = Some(stats);
        self
    }

    #[must_use]
    pub fn with_bowling(mut self, stats: BowlingStats) -> Self {
        self.bowling = Some(stats);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    #[must_use]
    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    #[must_use]
    pub fn batting(&self) -> Option<&BattingStats> {
        self.batting.as_ref()
    }

    #[must_use]
    pub fn bowling(&self) -> Option<&BowlingStats> {
        self.bowling.as_ref()
    }

    /// Returns `true` if the player's nationality differs from `home_nation`.
    ///
    /// Both sides are compared exactly after trimming surrounding whitespace.
    #[must_use]
    pub fn is_foreign(&self, home_nation: &str) -> bool {
        self.nationality.trim() != home_nation.trim()
    }

    /// Returns the role implied by the stat blocks, or `None` for a player with neither.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match (&self.batting, &self.bowling) {
            (Some(_), Some(_)) => Some(Role::AllRounder),
            (Some(_), None) => Some(Role::Batter),
            (None, Some(_)) => Some(Role::Bowler),
            (None, None) => None,
        }
    }

    pub(crate) fn set_id_if_absent(&mut self, id: Option<u32>) {
        if self.id.is_none() {
            self.id = id;
        }
    }

    pub(crate) fn set_batting_if_absent(&mut self, stats: BattingStats) -> bool {
        if self.batting.is_some() {
            return false;
        }
        self.batting = Some(stats);
        true
    }

    pub(crate) fn set_bowling_if_absent(&mut self, stats: BowlingStats) -> bool {
        if self.bowling.is_some() {
            return false;
        }
        self.bowling = Some(stats);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowling() -> BowlingStats {
        BowlingStats {
            matches_played: 5,
            runs_conceded: 150,
            balls_bowled: 120,
            economy: 7.5,
            wickets: 6,
            strike_rate: None,
        }
    }

    #[test]
    fn test_role_from_stat_blocks() {
        let batting = BattingStats {
            matches_played: 3,
            runs: 90,
            average: 30.0,
        };
        assert_eq!(Player::new("a", "India").role(), None);
        assert_eq!(
            Player::new("a", "India").with_bowling(bowling()).role(),
            Some(Role::Bowler)
        );
        assert_eq!(
            Player::new("a", "India")
                .with_batting(batting)
                .with_bowling(bowling())
                .role(),
            Some(Role::AllRounder)
        );
    }

    #[test]
    fn test_foreign_ignores_surrounding_whitespace() {
        let player = Player::new("a", " India ");
        assert!(!player.is_foreign("India"));
        assert!(player.is_foreign("india"));
    }

    #[test]
    fn test_stat_blocks_are_set_once() {
        let mut player = Player::new("a", "India");
        assert!(player.set_bowling_if_absent(bowling()));
        let mut other = bowling();
        other.wickets = 99;
        assert!(!player.set_bowling_if_absent(other));
        assert_eq!(player.bowling().map(|b| b.wickets), Some(6));
    }
}
