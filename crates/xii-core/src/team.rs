//! Teams and the composition rules they are checked against.

use serde::{Deserialize, Serialize};

/// Number of on-field players; every member beyond this is the reserve.
pub const PLAYING_XI: usize = 11;

/// Position of a player inside a [`PlayerPool`](crate::PlayerPool).
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
)]
pub struct PoolIndex(pub usize);

/// What to do when the pool cannot supply a 12th man.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum ReservePolicy {
    /// A team must reach the full team size; otherwise the pool is insufficient.
    #[default]
    Required,
    /// Field the playing XI without a reserve when only eleven players are selectable.
    BestEffort,
}

/// Composition rules for a selectable team.
///
/// The foreign-player cap applies to every member, the reserve included. An
/// all-rounder counts towards both role minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRules {
    pub team_size: usize,
    pub max_foreign: usize,
    pub min_batters: usize,
    pub min_bowlers: usize,
    pub reserve_policy: ReservePolicy,
}

impl Default for TeamRules {
    fn default() -> Self {
        Self {
            team_size: 12,
            max_foreign: 4,
            min_batters: 7,
            min_bowlers: 4,
            reserve_policy: ReservePolicy::Required,
        }
    }
}

impl TeamRules {
    /// Resolves the team size actually reachable with `selectable` players.
    ///
    /// Returns the rules unchanged when the full team size is reachable. Under
    /// [`ReservePolicy::BestEffort`] a pool of at least [`PLAYING_XI`] players yields
    /// rules with a reduced team size. Returns `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use xii_core::{ReservePolicy, TeamRules};
    ///
    /// let rules = TeamRules::default();
    /// assert_eq!(rules.fit_to_pool(11), None);
    ///
    /// let rules = TeamRules { reserve_policy: ReservePolicy::BestEffort, ..rules };
    /// assert_eq!(rules.fit_to_pool(11).map(|r| r.team_size), Some(11));
    /// assert_eq!(rules.fit_to_pool(10), None);
    /// ```
    #[must_use]
    pub fn fit_to_pool(&self, selectable: usize) -> Option<Self> {
        if selectable >= self.team_size {
            return Some(self.clone());
        }
        match self.reserve_policy {
            ReservePolicy::BestEffort if selectable >= PLAYING_XI.min(self.team_size) => {
                Some(Self {
                    team_size: selectable,
                    ..self.clone()
                })
            }
            _ => None,
        }
    }
}

/// An ordered selection of pool members.
///
/// A team is a plain value: it is built, scored and discarded many times during a
/// search. Validity against [`TeamRules`] is established by the constraint checker,
/// not by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Team {
    members: Vec<PoolIndex>,
}

impl Team {
    #[must_use]
    pub fn new(members: Vec<PoolIndex>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[PoolIndex] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: PoolIndex) -> bool {
        self.members.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = PoolIndex> + '_ {
        self.members.iter().copied()
    }

    #[must_use]
    pub fn into_members(self) -> Vec<PoolIndex> {
        self.members
    }
}

impl FromIterator<PoolIndex> for Team {
    fn from_iter<T: IntoIterator<Item = PoolIndex>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_pool_keeps_full_size() {
        let rules = TeamRules::default();
        assert_eq!(rules.fit_to_pool(30), Some(rules.clone()));
        assert_eq!(rules.fit_to_pool(12), Some(rules));
    }

    #[test]
    fn test_rules_deserialize_partially() {
        let rules: TeamRules = serde_json::from_str(r#"{ "max_foreign": 3 }"#).unwrap();
        assert_eq!(rules.max_foreign, 3);
        assert_eq!(rules.team_size, 12);
        assert!(rules.reserve_policy.is_required());
    }

    #[test]
    fn test_team_collects_in_order() {
        let team: Team = [2, 0, 1].into_iter().map(PoolIndex).collect();
        assert_eq!(team.members(), &[PoolIndex(2), PoolIndex(0), PoolIndex(1)]);
        assert!(team.contains(PoolIndex(0)));
        assert!(!team.contains(PoolIndex(3)));
    }
}
