use chrono::{DateTime, Utc};
use serde::Serialize;
use xii_core::{TeamRules, TeamSheet};
use xii_search::{
    Selection,
    config::{SearchSeed, Strategy},
    genetic::GenerationStats,
};

/// JSON document written by `xii select --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionDocument<'a> {
    pub venue: &'a str,
    pub selected_at: DateTime<Utc>,
    pub strategy: Strategy,
    pub seed: SearchSeed,
    pub fitness: f32,
    pub rules: &'a TeamRules,
    pub team: &'a TeamSheet,
    pub history: &'a [GenerationStats],
}

impl<'a> SelectionDocument<'a> {
    pub fn new(venue: &'a str, selection: &'a Selection, selected_at: DateTime<Utc>) -> Self {
        Self {
            venue,
            selected_at,
            strategy: selection.strategy,
            seed: selection.seed,
            fitness: selection.fitness,
            rules: &selection.rules,
            team: &selection.sheet,
            history: &selection.history,
        }
    }
}
