//! Raw per-venue statistics records.
//!
//! Field names follow the column headers of the venue statistics tables
//! (`Player`, `Venue`, `Country`, `total_runs`, ...), so a table exported to JSON
//! deserializes without renaming. Every non-optional field is required; a record
//! missing one fails to deserialize.

use serde::{Deserialize, Serialize};

use crate::{BattingStats, BowlingStats};

/// Batting and bowling records loaded from a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub batting: Vec<BattingRecord>,
    pub bowling: Vec<BowlingRecord>,
}

/// One player's batting figures at one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(default)]
    pub p_id: Option<u32>,
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Country")]
    pub country: String,
    pub matches_played: u32,
    pub total_runs: u32,
    pub batting_average: f32,
}

/// One player's bowling figures at one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(default)]
    pub p_id: Option<u32>,
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Country")]
    pub country: String,
    pub matches_played: u32,
    pub total_runs_conceded: u32,
    pub balls_bowled: u32,
    pub economy: f32,
    pub total_wickets: u32,
    #[serde(rename = "Bowling_Strike_Rate", default)]
    pub bowling_strike_rate: Option<f32>,
}

impl BattingRecord {
    #[must_use]
    pub fn stats(&self) -> BattingStats {
        BattingStats {
            matches_played: self.matches_played,
            runs: self.total_runs,
            average: self.batting_average,
        }
    }
}

impl BowlingRecord {
    #[must_use]
    pub fn stats(&self) -> BowlingStats {
        BowlingStats {
            matches_played: self.matches_played,
            runs_conceded: self.total_runs_conceded,
            balls_bowled: self.balls_bowled,
            economy: self.economy,
            wickets: self.total_wickets,
            strike_rate: self.bowling_strike_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_table_column_names() {
        let json = r#"{
            "batting": [{
                "Player": "V. Kohli", "p_id": 18, "Venue": "Wankhede", "Country": "India",
                "matches_played": 9, "total_runs": 402, "batting_average": 50.25
            }],
            "bowling": [{
                "Player": "J. Bumrah", "Venue": "Wankhede", "Country": "India",
                "matches_played": 9, "total_runs_conceded": 230, "balls_bowled": 210,
                "economy": 6.57, "total_wickets": 14
            }]
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.batting[0].p_id, Some(18));
        assert_eq!(dataset.batting[0].stats().runs, 402);
        assert_eq!(dataset.bowling[0].p_id, None);
        assert_eq!(dataset.bowling[0].stats().wickets, 14);
        assert_eq!(dataset.bowling[0].stats().strike_rate, None);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{
            "batting": [{ "Player": "V. Kohli", "Venue": "Wankhede", "Country": "India" }],
            "bowling": []
        }"#;
        let err = serde_json::from_str::<Dataset>(json).unwrap_err();
        assert!(err.to_string().contains("matches_played"));
    }
}
