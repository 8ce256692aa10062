//! Display-ready rendering of a selected team.
//!
//! A [`TeamSheet`] lists the playing XI batters first, then all-rounders, then
//! bowlers (each group keeping the team's selection order), followed by the 12th man.
//! The 12th man is the lowest-scoring member whose removal leaves the XI's role
//! minimums intact; if no member qualifies, the lowest-scoring member is used.
//!
//! The sheet renders as text through [`fmt::Display`] and as JSON through
//! [`Serialize`].

use std::fmt;

use serde::Serialize;

use crate::{BattingStats, BowlingStats, PLAYING_XI, PlayerPool, PoolIndex, Role, Team, TeamRules};

/// One line of a [`TeamSheet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSheetEntry {
    pub slot: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub nationality: String,
    pub foreign: bool,
    pub role: Role,
    pub reserve: bool,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batting: Option<BattingStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowling: Option<BowlingStats>,
}

/// A selected team ordered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSheet {
    pub fitness: f32,
    pub entries: Vec<TeamSheetEntry>,
}

impl TeamSheet {
    /// Builds the sheet for `team`.
    ///
    /// `scores` holds the evaluator score of every pool member, indexed by
    /// [`PoolIndex`].
    ///
    /// # Panics
    ///
    /// Panics if `team` references players outside `pool` or `scores`.
    #[must_use]
    pub fn new(pool: &PlayerPool, team: &Team, scores: &[f32], rules: &TeamRules) -> Self {
        let reserve = pick_reserve(pool, team, scores, rules);

        let mut order: Vec<PoolIndex> = team.iter().filter(|i| Some(*i) != reserve).collect();
        // stable: keeps selection order within each role group
        order.sort_by_key(|i| pool.player(*i).role());
        order.extend(reserve);

        let entries = order
            .into_iter()
            .enumerate()
            .map(|(n, index)| {
                let player = pool.player(index);
                TeamSheetEntry {
                    slot: n + 1,
                    name: player.name().to_owned(),
                    id: player.id(),
                    nationality: player.nationality().to_owned(),
                    foreign: pool.is_foreign(index),
                    role: player.role().unwrap_or(Role::Batter),
                    reserve: Some(index) == reserve,
                    score: scores[index.0],
                    batting: player.batting().cloned(),
                    bowling: player.bowling().cloned(),
                }
            })
            .collect();

        Self {
            fitness: team.iter().map(|i| scores[i.0]).sum(),
            entries,
        }
    }

    /// The on-field players in display order.
    pub fn playing_xi(&self) -> impl Iterator<Item = &TeamSheetEntry> {
        self.entries.iter().filter(|e| !e.reserve)
    }

    #[must_use]
    pub fn reserve(&self) -> Option<&TeamSheetEntry> {
        self.entries.iter().find(|e| e.reserve)
    }
}

fn pick_reserve(
    pool: &PlayerPool,
    team: &Team,
    scores: &[f32],
    rules: &TeamRules,
) -> Option<PoolIndex> {
    if team.len() <= PLAYING_XI {
        return None;
    }
    let batters = team.iter().filter(|i| pool.is_batter(*i)).count();
    let bowlers = team.iter().filter(|i| pool.is_bowler(*i)).count();
    let removable = |i: &PoolIndex| {
        (!pool.is_batter(*i) || batters > rules.min_batters)
            && (!pool.is_bowler(*i) || bowlers > rules.min_bowlers)
    };
    let lowest = |a: &PoolIndex, b: &PoolIndex| scores[a.0].total_cmp(&scores[b.0]);
    team.iter()
        .filter(removable)
        .min_by(lowest)
        .or_else(|| team.iter().min_by(lowest))
}

impl fmt::Display for TeamSheetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(id) = self.id {
            write!(f, " (#{id})")?;
        }
        write!(f, " [{}, {}", self.role, self.nationality)?;
        if self.foreign {
            write!(f, ", overseas")?;
        }
        write!(f, "] score {:.1}", self.score)?;
        if let Some(b) = &self.batting {
            write!(
                f,
                " - Matches: {}, Runs: {}, Avg: {:.2}",
                b.matches_played, b.runs, b.average
            )?;
        }
        if let Some(b) = &self.bowling {
            write!(
                f,
                " - Balls: {}, Econ: {:.2}, Wkts: {}",
                b.balls_bowled, b.economy, b.wickets
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TeamSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Playing XI:")?;
        for entry in self.playing_xi() {
            writeln!(f, "{:2}. {entry}", entry.slot)?;
        }
        match self.reserve() {
            Some(entry) => writeln!(f, "\n12th Man: {entry}")?,
            None => writeln!(f, "\n12th Man: none available")?,
        }
        write!(f, "Team fitness: {:.1}", self.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    fn batter(name: &str) -> Player {
        Player::new(name, "India").with_batting(BattingStats {
            matches_played: 1,
            runs: 10,
            average: 10.0,
        })
    }

    fn bowler(name: &str) -> Player {
        Player::new(name, "England").with_bowling(BowlingStats {
            matches_played: 1,
            runs_conceded: 30,
            balls_bowled: 24,
            economy: 7.5,
            wickets: 1,
            strike_rate: None,
        })
    }

    fn rules() -> TeamRules {
        TeamRules {
            team_size: 4,
            min_batters: 2,
            min_bowlers: 1,
            ..TeamRules::default()
        }
    }

    #[test]
    fn test_orders_batters_before_bowlers() {
        let pool = PlayerPool::from_players(
            vec![bowler("w1"), batter("b1"), batter("b2"), bowler("w2")],
            "India",
        );
        let team: Team = [0, 1, 2, 3].into_iter().map(PoolIndex).collect();
        let scores = [5.0, 9.0, 8.0, 1.0];
        let sheet = TeamSheet::new(&pool, &team, &scores, &rules());
        // teams no larger than the XI have no reserve
        assert!(sheet.reserve().is_none());
        let names: Vec<_> = sheet.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b1", "b2", "w1", "w2"]);
        assert_eq!(sheet.fitness, 23.0);
    }

    #[test]
    fn test_reserve_keeps_role_minimums() {
        let mut players: Vec<Player> = (0..8).map(|i| batter(&format!("b{i}"))).collect();
        players.extend((0..4).map(|i| bowler(&format!("w{i}"))));
        let pool = PlayerPool::from_players(players, "India");
        let team: Team = (0..12).map(PoolIndex).collect();
        let mut scores = vec![50.0; 12];
        // a bowler is the weakest player but is needed for the bowling minimum
        scores[11] = 1.0;
        scores[3] = 20.0;
        let sheet = TeamSheet::new(&pool, &team, &scores, &TeamRules::default());

        let reserve = sheet.reserve().unwrap();
        assert_eq!(reserve.name, "b3");
        assert_eq!(reserve.slot, 12);
        assert_eq!(sheet.playing_xi().count(), 11);
        assert!(sheet.to_string().contains("12th Man: b3"));
    }

    #[test]
    fn test_serializes_reserve_flag() {
        let mut players: Vec<Player> = (0..8).map(|i| batter(&format!("b{i}"))).collect();
        players.extend((0..4).map(|i| bowler(&format!("w{i}"))));
        let pool = PlayerPool::from_players(players, "India");
        let team: Team = (0..12).map(PoolIndex).collect();
        let sheet = TeamSheet::new(&pool, &team, &[1.0; 12], &TeamRules::default());
        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["entries"][11]["reserve"], true);
        assert_eq!(json["entries"][11]["role"], "batter");
        assert_eq!(json["entries"][8]["foreign"], true);
    }
}
