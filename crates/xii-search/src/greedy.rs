//! Greedy baseline selection.
//!
//! Walks the players in score order three times:
//!
//! 1. best batting candidates until `min_batters` is met
//! 2. best bowling candidates until `min_bowlers` is met
//! 3. best remaining players until the team is full
//!
//! Foreign players are skipped once the cap is reached. The result is deterministic
//! for a given pool and rules. If the walk cannot satisfy the rules (e.g. a team size
//! too small for both role minimums without all-rounders), the team is handed to
//! [`roster::repair`] instead.

use log::debug;
use rand::Rng;
use xii_core::{PlayerPool, PoolIndex, Team, TeamRules};
use xii_evaluator::constraint::Composition;

use crate::{SearchContext, roster};

/// Selects a team from the score ranking.
///
/// Returns `None` when neither the ranking walk nor repair yields a valid team.
pub fn select<R>(ctx: &SearchContext<'_>, rng: &mut R) -> Option<Team>
where
    R: Rng + ?Sized,
{
    let pool = ctx.pool;
    let rules = ctx.rules;
    let ranking = ctx.evaluator.ranking();

    let mut walk = Walk {
        pool,
        rules,
        members: Vec::with_capacity(rules.team_size),
    };
    walk.take(&ranking, |i, c| pool.is_batter(i) && c.batters < rules.min_batters);
    walk.take(&ranking, |i, c| pool.is_bowler(i) && c.bowlers < rules.min_bowlers);
    walk.take(&ranking, |_, c| c.size < rules.team_size);

    let team = Team::new(walk.members);
    if ctx.checker().is_valid(&team) {
        return Some(team);
    }
    debug!(
        "ranking walk broke the rules ({:?}); repairing",
        ctx.checker().violations(&team)
    );
    roster::repair(pool, rules, team.into_members(), rng)
}

struct Walk<'a> {
    pool: &'a PlayerPool,
    rules: &'a TeamRules,
    members: Vec<PoolIndex>,
}

impl Walk<'_> {
    /// Adds players in `ranking` order while `wanted` holds for them and the
    /// current composition.
    fn take<F>(&mut self, ranking: &[PoolIndex], wanted: F)
    where
        F: Fn(PoolIndex, &Composition) -> bool,
    {
        for &index in ranking {
            let c = Composition::of(self.pool, &self.members);
            if c.size >= self.rules.team_size {
                return;
            }
            if self.members.contains(&index) || !wanted(index, &c) {
                continue;
            }
            if self.pool.is_foreign(index) && c.foreign >= self.rules.max_foreign {
                continue;
            }
            self.members.push(index);
        }
    }
}
