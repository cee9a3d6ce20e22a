//! Domain records for weekly bet grading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence tier assigned to a recommendation by the analytics side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    #[serde(alias = "BLUE CHIP", alias = "BLUE_CHIP")]
    BlueChip,
    #[serde(alias = "TARGETED")]
    Targeted,
    #[serde(alias = "LEAN")]
    Lean,
}

impl Classification {
    /// All tiers in display order (strongest first).
    pub const ALL: [Classification; 3] = [
        Classification::BlueChip,
        Classification::Targeted,
        Classification::Lean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::BlueChip => "blue_chip",
            Classification::Targeted => "targeted",
            Classification::Lean => "lean",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged betting recommendation. Immutable once logged; identified by
/// season, week, matchup text, and bet text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub season: u16,
    pub week: u8,
    /// Free-form matchup text, e.g. "Chiefs @ Bills".
    pub matchup: String,
    /// Free-form bet text, e.g. "KC -3.5 / Over 47.5".
    pub bet_text: String,
    pub classification: Classification,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    /// Identity key used for idempotent outcome storage.
    /// Lowercased and whitespace-collapsed so cosmetic edits to the
    /// logged text do not create duplicate entries.
    pub fn key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.season,
            self.week,
            squash(&self.matchup),
            squash(&self.bet_text)
        )
    }
}

fn squash(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Final score record supplied by the external score feed. Read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinalScore {
    pub week: u8,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub completed: bool,
}

impl FinalScore {
    pub fn total_points(&self) -> u16 {
        self.home_score + self.away_score
    }

    /// Away team listed first, matching the score feed convention.
    pub fn summary(&self) -> String {
        format!(
            "{} {}-{} {}",
            self.away_team, self.away_score, self.home_score, self.home_team
        )
    }
}

/// Recognized bet grammar. Anything the parser cannot classify stays
/// `Unknown` and is never evaluated numerically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Spread,
    Total,
    SpreadAndTotal,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalDirection {
    Over,
    Under,
}

/// Structured bet intent extracted from free text. Derived, not persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedBet {
    /// Raw team token for the spread side, unresolved. Normalization
    /// happens against the matched game's teams at evaluation time.
    pub side_team: Option<String>,
    pub line_type: LineType,
    pub spread_value: Option<f64>,
    pub total_value: Option<f64>,
    pub total_direction: Option<TotalDirection>,
    /// Original text, retained for manual review of Unknown bets.
    pub raw_text: String,
}

impl ParsedBet {
    pub fn unknown(raw: &str) -> Self {
        Self {
            side_team: None,
            line_type: LineType::Unknown,
            spread_value: None,
            total_value: None,
            total_direction: None,
            raw_text: raw.to_string(),
        }
    }
}

/// Graded result of a single recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    Win,
    Loss,
    Push,
    Unresolved,
}

impl BetResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetResult::Win => "WIN",
            BetResult::Loss => "LOSS",
            BetResult::Push => "PUSH",
            BetResult::Unresolved => "UNRESOLVED",
        }
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved outcome for one recommendation. Written once per resolution
/// attempt; re-runs replace by recommendation identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Outcome {
    pub recommendation_key: String,
    /// "Away @ Home" of the matched game.
    pub matched_game: String,
    pub result: BetResult,
    pub final_score_summary: String,
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_key_normalizes_text() {
        let rec = Recommendation {
            season: 2024,
            week: 12,
            matchup: "Chiefs  @  Bills".to_string(),
            bet_text: "KC -3.5".to_string(),
            classification: Classification::BlueChip,
            created_at: Utc::now(),
        };
        assert_eq!(rec.key(), "2024:12:chiefs @ bills:kc -3.5");

        let mut cosmetic = rec.clone();
        cosmetic.matchup = "CHIEFS @ BILLS".to_string();
        assert_eq!(rec.key(), cosmetic.key());
    }

    #[test]
    fn test_final_score_summary() {
        let score = FinalScore {
            week: 12,
            home_team: "Buffalo Bills".to_string(),
            away_team: "Kansas City Chiefs".to_string(),
            home_score: 17,
            away_score: 31,
            completed: true,
        };
        assert_eq!(score.total_points(), 48);
        assert_eq!(score.summary(), "Kansas City Chiefs 31-17 Buffalo Bills");
    }

    #[test]
    fn test_classification_accepts_feed_aliases() {
        let tier: Classification = serde_json::from_str("\"BLUE CHIP\"").unwrap();
        assert_eq!(tier, Classification::BlueChip);
        let tier: Classification = serde_json::from_str("\"lean\"").unwrap();
        assert_eq!(tier, Classification::Lean);
    }
}
