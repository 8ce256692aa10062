use std::fmt;

use serde::Serialize;
use xii_core::{PlayerPool, Role};
use xii_evaluator::team_evaluator::TeamEvaluator;

/// One line of `xii rank`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub name: String,
    pub nationality: String,
    pub foreign: bool,
    pub role: Option<Role>,
    pub score: f32,
}

impl RankedPlayer {
    /// Lists every pool member, best score first.
    pub fn ranking(pool: &PlayerPool, evaluator: &TeamEvaluator) -> Vec<Self> {
        evaluator
            .ranking()
            .into_iter()
            .enumerate()
            .map(|(n, index)| {
                let player = pool.player(index);
                Self {
                    rank: n + 1,
                    name: player.name().to_owned(),
                    nationality: player.nationality().to_owned(),
                    foreign: pool.is_foreign(index),
                    role: player.role(),
                    score: evaluator.score(index),
                }
            })
            .collect()
    }
}

impl fmt::Display for RankedPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:3}. {:<28} {:>8.1}  ", self.rank, self.name, self.score)?;
        let role = self.role.map_or_else(|| "-".to_owned(), |r| r.to_string());
        write!(f, "{role:<12}")?;
        write!(f, " {}", self.nationality)?;
        if self.foreign {
            write!(f, " (overseas)")?;
        }
        Ok(())
    }
}
