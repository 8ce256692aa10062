//! Team operations for the search.
//!
//! This module provides the functions that create and transform team member lists.
//! [`genetic::PopulationEvolver`](crate::genetic::PopulationEvolver) uses them for
//! initialization, crossover, mutation and repair.
//!
//! # Operations
//!
//! - **Initialization**: [`random`] seeds a team with random foreign players and
//!   completes it by repair
//! - **Crossover**: [`crossover`] joins the head of one parent with the tail of another
//! - **Mutation**: [`mutate`] swaps one member for a random non-member
//! - **Repair**: [`repair`] turns any member list into a team that passes the
//!   [`ConstraintChecker`](xii_evaluator::constraint::ConstraintChecker), if possible
//!
//! # Repair Order
//!
//! 1. Remove duplicates (first occurrence kept)
//! 2. Remove random foreign members until the cap holds
//! 3. Truncate to the team size
//! 4. Repeat until the team is complete:
//!    - full but a role minimum unmet: remove a random member the minimums can spare
//!    - role minimum unmet: add a random unused player of that role (all-rounders
//!      first when both roles are short)
//!    - otherwise: add a random unused domestic player, then foreign players while
//!      under the cap
//!
//! Crossover and mutation never check the rules themselves. Every child goes through
//! [`repair`] before it is scored.

use std::collections::HashSet;

use log::trace;
use rand::{Rng, seq::IndexedRandom};
use xii_core::{PlayerPool, PoolIndex, Team, TeamRules};
use xii_evaluator::constraint::Composition;

/// Removes repeated members, keeping the first occurrence of each.
pub fn dedup(members: &mut Vec<PoolIndex>) {
    let mut seen = HashSet::with_capacity(members.len());
    members.retain(|i| seen.insert(*i));
}

/// Builds a random valid team.
///
/// The team starts from `0..=max_foreign` random foreign players and is completed by
/// [`repair`], so both foreign-heavy and all-domestic teams appear in a population.
///
/// Returns `None` when repair cannot complete the team.
pub fn random<R>(pool: &PlayerPool, rules: &TeamRules, rng: &mut R) -> Option<Team>
where
    R: Rng + ?Sized,
{
    let foreign: Vec<PoolIndex> = pool.indices().filter(|i| pool.is_foreign(*i)).collect();
    let max = rules.max_foreign.min(foreign.len()).min(rules.team_size);
    let count = rng.random_range(0..=max);
    let seed = foreign.choose_multiple(rng, count).copied().collect();
    repair(pool, rules, seed, rng)
}

/// Single-point crossover: `a[..split]` followed by `b[split..]`, de-duplicated.
///
/// `split` is clamped to the shorter parent.
///
/// # Examples
///
/// ```
/// use xii_core::PoolIndex;
/// use xii_search::roster;
///
/// let a = [0, 1, 2, 3].map(PoolIndex);
/// let b = [4, 0, 5, 6].map(PoolIndex);
/// assert_eq!(roster::crossover(&a, &b, 2), [0, 1, 5, 6].map(PoolIndex));
/// assert_eq!(roster::crossover(&a, &b, 1), [0, 5, 6].map(PoolIndex));
/// ```
#[must_use]
pub fn crossover(a: &[PoolIndex], b: &[PoolIndex], split: usize) -> Vec<PoolIndex> {
    let split = split.min(a.len()).min(b.len());
    let mut child: Vec<PoolIndex> = a[..split].iter().chain(&b[split..]).copied().collect();
    dedup(&mut child);
    child
}

/// With probability `rate`, replaces one random member with a random non-member.
///
/// Returns whether a member was replaced. The result may break the rules; it is
/// expected to be repaired afterwards.
///
/// # Panics
///
/// Panics if `rate` is not in `[0, 1]`.
pub fn mutate<R>(pool: &PlayerPool, members: &mut [PoolIndex], rate: f32, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    if members.is_empty() || !rng.random_bool(f64::from(rate)) {
        return false;
    }
    let outsiders: Vec<PoolIndex> = pool.indices().filter(|i| !members.contains(i)).collect();
    let Some(&replacement) = outsiders.choose(rng) else {
        return false;
    };
    let slot = rng.random_range(0..members.len());
    members[slot] = replacement;
    true
}

/// Turns `members` into a team satisfying `rules`.
///
/// See the module documentation for the order of steps. Returns `None` when the
/// pool cannot complete the team from this starting point.
pub fn repair<R>(
    pool: &PlayerPool,
    rules: &TeamRules,
    mut members: Vec<PoolIndex>,
    rng: &mut R,
) -> Option<Team>
where
    R: Rng + ?Sized,
{
    dedup(&mut members);
    trim_foreign(pool, rules.max_foreign, &mut members, rng);
    members.truncate(rules.team_size);

    let max_steps = 4 * (rules.team_size + pool.len());
    for _ in 0..max_steps {
        let c = Composition::of(pool, &members);
        let need_batters = c.batters < rules.min_batters;
        let need_bowlers = c.bowlers < rules.min_bowlers;
        if !need_batters && !need_bowlers && c.size == rules.team_size {
            return Some(Team::new(members));
        }

        let spare = |i: &PoolIndex| {
            (!pool.is_batter(*i) || c.batters > rules.min_batters)
                && (!pool.is_bowler(*i) || c.bowlers > rules.min_bowlers)
        };

        if c.size >= rules.team_size {
            // full with a role deficit
            let spares: Vec<usize> = positions(&members, spare);
            let &pos = spares.choose(rng)?;
            members.remove(pos);
            continue;
        }

        let under_cap = c.foreign < rules.max_foreign;
        let unused = |i: &PoolIndex| !members.contains(i);
        let role_fit = |i: &PoolIndex| {
            if need_batters && need_bowlers {
                pool.is_batter(*i) && pool.is_bowler(*i)
            } else if need_batters {
                pool.is_batter(*i)
            } else if need_bowlers {
                pool.is_bowler(*i)
            } else {
                true
            }
        };

        let mut candidates: Vec<PoolIndex> = pool
            .indices()
            .filter(|i| unused(i) && role_fit(i) && (under_cap || !pool.is_foreign(*i)))
            .collect();
        if need_batters && need_bowlers && candidates.is_empty() {
            // no all-rounder left: cover one role at a time
            candidates = pool
                .indices()
                .filter(|i| unused(i) && (under_cap || !pool.is_foreign(*i)))
                .filter(|i| pool.is_batter(*i) || pool.is_bowler(*i))
                .collect();
        }
        if !need_batters && !need_bowlers && candidates.iter().any(|i| !pool.is_foreign(*i)) {
            candidates.retain(|i| !pool.is_foreign(*i));
        }

        if let Some(&pick) = candidates.choose(rng) {
            members.push(pick);
            continue;
        }

        // role players exist only beyond the foreign cap: free a foreign slot
        let foreign_spares = positions(&members, |i| pool.is_foreign(*i) && spare(i));
        let &pos = foreign_spares.choose(rng)?;
        members.remove(pos);
    }

    trace!("repair gave up after {max_steps} steps");
    None
}

fn trim_foreign<R>(pool: &PlayerPool, max_foreign: usize, members: &mut Vec<PoolIndex>, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let foreign = positions(members, |i| pool.is_foreign(*i));
    if foreign.len() <= max_foreign {
        return;
    }
    let dropped: HashSet<usize> = foreign
        .choose_multiple(rng, foreign.len() - max_foreign)
        .copied()
        .collect();
    let mut pos = 0;
    members.retain(|_| {
        let keep = !dropped.contains(&pos);
        pos += 1;
        keep
    });
}

fn positions<F>(members: &[PoolIndex], mut pred: F) -> Vec<usize>
where
    F: FnMut(&PoolIndex) -> bool,
{
    members
        .iter()
        .enumerate()
        .filter(|(_, i)| pred(i))
        .map(|(pos, _)| pos)
        .collect()
}
