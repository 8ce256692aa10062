//! The candidate pool for one squad × venue query.
//!
//! A [`PlayerPool`] is built once per query and is read-only afterwards. It owns the
//! merged [`Player`] values and two index partitions:
//!
//! - **batting candidates** - players with a batting record at the venue
//! - **bowling candidates** - players with a bowling record at the venue
//!
//! A player with both records appears in both partitions but only once in the player
//! list, so a team can never hold the same player twice through different partitions.

use std::collections::{BTreeMap, BTreeSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{Dataset, InsufficientDataError, Player, PoolIndex, TeamRules};

/// How venue names from the dataset are compared with the requested venue.
///
/// Both sides are trimmed of surrounding whitespace before comparison.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueMatch {
    /// Case-sensitive comparison.
    #[default]
    Exact,
    /// ASCII case-insensitive comparison.
    IgnoreAsciiCase,
}

impl VenueMatch {
    #[must_use]
    pub fn matches(self, venue: &str, requested: &str) -> bool {
        let (venue, requested) = (venue.trim(), requested.trim());
        match self {
            Self::Exact => venue == requested,
            Self::IgnoreAsciiCase => venue.eq_ignore_ascii_case(requested),
        }
    }
}

/// Parameters of a pool query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolQuery {
    pub squad: BTreeSet<String>,
    pub venue: String,
    pub venue_match: VenueMatch,
    pub home_nation: String,
}

impl PoolQuery {
    /// Default home nation used to classify players as domestic or foreign.
    pub const DEFAULT_HOME_NATION: &'static str = "India";

    /// Creates a query with exact venue matching and the default home nation.
    ///
    /// Squad names are trimmed.
    pub fn new<I, S>(squad: I, venue: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            squad: squad
                .into_iter()
                .map(|name| name.as_ref().trim().to_owned())
                .filter(|name| !name.is_empty())
                .collect(),
            venue: venue.into(),
            venue_match: VenueMatch::Exact,
            home_nation: Self::DEFAULT_HOME_NATION.to_owned(),
        }
    }

    #[must_use]
    pub fn with_venue_match(mut self, venue_match: VenueMatch) -> Self {
        self.venue_match = venue_match;
        self
    }

    #[must_use]
    pub fn with_home_nation(mut self, home_nation: impl Into<String>) -> Self {
        self.home_nation = home_nation.into();
        self
    }

    fn admits(&self, player: &str, venue: &str) -> bool {
        self.squad.contains(player.trim()) && self.venue_match.matches(venue, &self.venue)
    }
}

/// Candidate players for one squad × venue query.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    home_nation: String,
    players: Vec<Player>,
    foreign: Vec<bool>,
    batting: Vec<PoolIndex>,
    bowling: Vec<PoolIndex>,
}

impl PlayerPool {
    /// Filters `dataset` down to the squad and venue of `query`.
    ///
    /// Batting and bowling records of the same player are merged into one [`Player`].
    /// Repeated records for the same player and role keep the first one.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientDataError`] when fewer than `rules.min_batters` batting
    /// candidates or fewer than `rules.min_bowlers` bowling candidates remain.
    pub fn build(
        dataset: &Dataset,
        query: &PoolQuery,
        rules: &TeamRules,
    ) -> Result<Self, InsufficientDataError> {
        let mut players: Vec<Player> = vec![];
        let mut by_name = BTreeMap::new();
        let mut entry = |name: &str, id: Option<u32>, country: &str| -> usize {
            *by_name.entry(name.trim().to_owned()).or_insert_with(|| {
                let mut player = Player::new(name.trim(), country.trim());
                player.set_id_if_absent(id);
                players.push(player);
                players.len() - 1
            })
        };

        let mut slots = vec![];
        for record in dataset
            .batting
            .iter()
            .filter(|r| query.admits(&r.player, &r.venue))
        {
            slots.push((entry(&record.player, record.p_id, &record.country), record));
        }
        let mut bowling_slots = vec![];
        for record in dataset
            .bowling
            .iter()
            .filter(|r| query.admits(&r.player, &r.venue))
        {
            bowling_slots.push((entry(&record.player, record.p_id, &record.country), record));
        }

        for (i, record) in slots {
            if !players[i].set_batting_if_absent(record.stats()) {
                warn!(
                    "duplicate batting record for {} at {}; keeping the first",
                    record.player, record.venue
                );
            }
        }
        for (i, record) in bowling_slots {
            players[i].set_id_if_absent(record.p_id);
            if !players[i].set_bowling_if_absent(record.stats()) {
                warn!(
                    "duplicate bowling record for {} at {}; keeping the first",
                    record.player, record.venue
                );
            }
        }

        let pool = Self::from_players(players, query.home_nation.clone());
        info!(
            "pool for {:?}: {} players ({} batting, {} bowling, {} foreign)",
            query.venue.trim(),
            pool.len(),
            pool.batting.len(),
            pool.bowling.len(),
            pool.foreign_count(),
        );
        pool.ensure_role_minimums(rules)?;
        Ok(pool)
    }

    /// Creates a pool directly from merged players.
    ///
    /// Players without any stat block are ignored. No minimum checks are applied;
    /// see [`Self::ensure_role_minimums`].
    pub fn from_players(players: Vec<Player>, home_nation: impl Into<String>) -> Self {
        let home_nation = home_nation.into();
        let players: Vec<Player> = players.into_iter().filter(|p| p.role().is_some()).collect();
        let foreign = players.iter().map(|p| p.is_foreign(&home_nation)).collect();
        let indices = || (0..players.len()).map(PoolIndex);
        let batting = indices()
            .filter(|i| players[i.0].batting().is_some())
            .collect();
        let bowling = indices()
            .filter(|i| players[i.0].bowling().is_some())
            .collect();
        Self {
            home_nation,
            players,
            foreign,
            batting,
            bowling,
        }
    }

    /// Checks the hard precondition for any selection.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientDataError::Batters`] or [`InsufficientDataError::Bowlers`]
    /// when a role partition is below its minimum.
    pub fn ensure_role_minimums(&self, rules: &TeamRules) -> Result<(), InsufficientDataError> {
        if self.batting.len() < rules.min_batters {
            return Err(InsufficientDataError::Batters {
                found: self.batting.len(),
                required: rules.min_batters,
            });
        }
        if self.bowling.len() < rules.min_bowlers {
            return Err(InsufficientDataError::Bowlers {
                found: self.bowling.len(),
                required: rules.min_bowlers,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn home_nation(&self) -> &str {
        &self.home_nation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this pool.
    #[must_use]
    pub fn player(&self, index: PoolIndex) -> &Player {
        &self.players[index.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = PoolIndex> + '_ {
        (0..self.players.len()).map(PoolIndex)
    }

    #[must_use]
    pub fn is_foreign(&self, index: PoolIndex) -> bool {
        self.foreign[index.0]
    }

    #[must_use]
    pub fn is_batter(&self, index: PoolIndex) -> bool {
        self.players[index.0].batting().is_some()
    }

    #[must_use]
    pub fn is_bowler(&self, index: PoolIndex) -> bool {
        self.players[index.0].bowling().is_some()
    }

    /// Batting candidates in pool order.
    #[must_use]
    pub fn batting_candidates(&self) -> &[PoolIndex] {
        &self.batting
    }

    /// Bowling candidates in pool order.
    #[must_use]
    pub fn bowling_candidates(&self) -> &[PoolIndex] {
        &self.bowling
    }

    #[must_use]
    pub fn foreign_count(&self) -> usize {
        self.foreign.iter().filter(|f| **f).count()
    }

    /// Number of players that can share one team under a foreign-player cap.
    #[must_use]
    pub fn selectable_count(&self, max_foreign: usize) -> usize {
        let foreign = self.foreign_count();
        self.len() - foreign + foreign.min(max_foreign)
    }

    /// Finds a player by exact (trimmed) name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PoolIndex> {
        self.players
            .iter()
            .position(|p| p.name() == name.trim())
            .map(PoolIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BattingRecord, BowlingRecord};

    fn batting(player: &str, venue: &str, country: &str, runs: u32) -> BattingRecord {
        BattingRecord {
            player: player.to_owned(),
            p_id: None,
            venue: venue.to_owned(),
            country: country.to_owned(),
            matches_played: 5,
            total_runs: runs,
            batting_average: 30.0,
        }
    }

    fn bowling(player: &str, venue: &str, country: &str, wickets: u32) -> BowlingRecord {
        BowlingRecord {
            player: player.to_owned(),
            p_id: Some(7),
            venue: venue.to_owned(),
            country: country.to_owned(),
            matches_played: 5,
            total_runs_conceded: 160,
            balls_bowled: 120,
            economy: 8.0,
            total_wickets: wickets,
            bowling_strike_rate: None,
        }
    }

    fn relaxed_rules() -> TeamRules {
        TeamRules {
            min_batters: 1,
            min_bowlers: 1,
            ..TeamRules::default()
        }
    }

    #[test]
    fn test_filters_by_squad_and_venue() {
        let dataset = Dataset {
            batting: vec![
                batting("A", "Chepauk", "India", 100),
                batting("B", "Chepauk", "India", 100),
                batting("A", "Wankhede", "India", 300),
            ],
            bowling: vec![bowling("C", "Chepauk", "England", 4)],
        };
        let query = PoolQuery::new(["A", " C "], "Chepauk");
        let pool = PlayerPool::build(&dataset, &query, &relaxed_rules()).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.player(PoolIndex(0)).batting().unwrap().runs, 100);
        assert!(pool.is_foreign(PoolIndex(1)));
        assert_eq!(pool.batting_candidates(), &[PoolIndex(0)]);
        assert_eq!(pool.bowling_candidates(), &[PoolIndex(1)]);
    }

    #[test]
    fn test_merges_roles_of_same_player() {
        let dataset = Dataset {
            batting: vec![batting("A", "Chepauk", "India", 100)],
            bowling: vec![
                bowling("A", "Chepauk", "India", 4),
                bowling("A", "Chepauk", "India", 9),
            ],
        };
        let query = PoolQuery::new(["A"], "Chepauk");
        let pool = PlayerPool::build(&dataset, &query, &relaxed_rules()).unwrap();
        assert_eq!(pool.len(), 1);
        let player = pool.player(PoolIndex(0));
        assert_eq!(player.id(), Some(7));
        assert_eq!(player.bowling().unwrap().wickets, 4);
        assert!(pool.is_batter(PoolIndex(0)) && pool.is_bowler(PoolIndex(0)));
    }

    #[test]
    fn test_venue_match_modes() {
        assert!(VenueMatch::Exact.matches("Eden Gardens ", "Eden Gardens"));
        assert!(!VenueMatch::Exact.matches("eden gardens", "Eden Gardens"));
        assert!(VenueMatch::IgnoreAsciiCase.matches("eden gardens", " Eden Gardens"));
    }

    #[test]
    fn test_empty_filter_is_insufficient() {
        let dataset = Dataset {
            batting: vec![batting("A", "Chepauk", "India", 100)],
            bowling: vec![],
        };
        let query = PoolQuery::new(["Z"], "Chepauk");
        let err = PlayerPool::build(&dataset, &query, &TeamRules::default()).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError::Batters {
                found: 0,
                required: 7
            }
        );
    }

    #[test]
    fn test_missing_bowlers_is_insufficient() {
        let batting = (0..7)
            .map(|i| batting(&format!("B{i}"), "Chepauk", "India", 10))
            .collect();
        let dataset = Dataset {
            batting,
            bowling: vec![bowling("C", "Chepauk", "India", 1)],
        };
        let squad = (0..7).map(|i| format!("B{i}")).chain(["C".to_owned()]);
        let query = PoolQuery::new(squad, "Chepauk");
        let err = PlayerPool::build(&dataset, &query, &TeamRules::default()).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError::Bowlers {
                found: 1,
                required: 4
            }
        );
    }

    #[test]
    fn test_selectable_count_applies_cap() {
        let players = (0..6)
            .map(|i| {
                let country = if i < 5 { "Australia" } else { "India" };
                Player::new(format!("P{i}"), country).with_batting(crate::BattingStats {
                    matches_played: 1,
                    runs: 1,
                    average: 1.0,
                })
            })
            .collect();
        let pool = PlayerPool::from_players(players, "India");
        assert_eq!(pool.foreign_count(), 5);
        assert_eq!(pool.selectable_count(4), 5);
        assert_eq!(pool.find("P5"), Some(PoolIndex(5)));
    }
}
