//! Core data model for Playing XII selection.
//!
//! This crate holds everything the selection algorithm reads but never mutates:
//!
//! - [`record`] - Raw per-venue batting and bowling records as they appear in a dataset
//! - [`player`] - A candidate player with optional batting and bowling stat blocks
//! - [`pool`] - The candidate pool for one squad × venue query, split into batting and
//!   bowling partitions
//! - [`team`] - Team composition rules and the team value handled by the search
//! - [`team_sheet`] - Display-ready rendering of a selected team
//!
//! # Data Flow
//!
//! ```text
//! Dataset (batting + bowling records)
//!     ↓ filtered by squad and venue
//! PlayerPool
//!     ↓ searched by xii-search
//! Team
//!     ↓ rendered
//! TeamSheet
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use xii_core::{BattingRecord, Dataset, PlayerPool, PoolQuery, TeamRules};
//!
//! let dataset = Dataset {
//!     batting: vec![BattingRecord {
//!         player: "A. Batter".into(),
//!         p_id: None,
//!         venue: "Eden Gardens".into(),
//!         country: "India".into(),
//!         matches_played: 4,
//!         total_runs: 180,
//!         batting_average: 45.0,
//!     }],
//!     bowling: vec![],
//! };
//! let squad = BTreeSet::from(["A. Batter".to_owned()]);
//! let query = PoolQuery::new(squad, "Eden Gardens");
//!
//! // One batter and no bowlers cannot field a team.
//! assert!(PlayerPool::build(&dataset, &query, &TeamRules::default()).is_err());
//! ```

pub use self::{player::*, pool::*, record::*, team::*, team_sheet::*};

pub mod player;
pub mod pool;
pub mod record;
pub mod team;
pub mod team_sheet;

/// The candidate pool cannot support a team under the current rules.
///
/// Raised before any search iteration runs. More data cannot be synthesized, so
/// callers should report it rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InsufficientDataError {
    #[display("only {found} batting candidates in the squad at this venue, {required} required")]
    Batters { found: usize, required: usize },
    #[display("only {found} bowling candidates in the squad at this venue, {required} required")]
    Bowlers { found: usize, required: usize },
    #[display(
        "{selectable} selectable players (after the foreign-player cap), a team needs {required}"
    )]
    TooFewPlayers { selectable: usize, required: usize },
    #[display("no team satisfying the selection rules can be built from {players} players")]
    NoValidTeam { players: usize },
}
