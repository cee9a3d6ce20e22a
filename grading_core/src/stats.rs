//! Historical grading store and aggregate statistics.
//!
//! Outcome records are keyed by recommendation identity, so re-running
//! resolution for a week replaces entries instead of double-counting
//! them. Aggregate views fold over the record map; they are never
//! stored counters that could drift.
//!
//! The caller serializes access: at most one writer per store file at
//! a time.

use crate::models::{BetResult, Classification, Outcome, Recommendation};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

const DEFAULT_STATS_PATH: &str = "data/historical/grading_stats.json";

/// One stored outcome plus the grouping fields the aggregate views
/// bucket by.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub outcome: Outcome,
    pub classification: Classification,
    pub season: u16,
    pub week: u8,
}

/// Win/loss/push counts for one bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl Bucket {
    fn add(&mut self, result: BetResult) {
        match result {
            BetResult::Win => self.wins += 1,
            BetResult::Loss => self.losses += 1,
            BetResult::Push => self.pushes += 1,
            // Unresolved records are never stored; nothing to count.
            BetResult::Unresolved => {}
        }
    }

    pub fn decided(&self) -> u32 {
        self.wins + self.losses
    }

    /// Pushes excluded from the denominator, standard betting
    /// convention. None when nothing has been decided.
    pub fn win_rate(&self) -> Option<f64> {
        match self.decided() {
            0 => None,
            decided => Some(f64::from(self.wins) / f64::from(decided)),
        }
    }

    /// "W-L" record string, with pushes appended when present.
    pub fn record(&self) -> String {
        if self.pushes > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.pushes)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }
}

/// Persisted historical store. Append/update only; never deleted by
/// the core.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoricalStats {
    outcomes: HashMap<String, OutcomeRecord>,
}

impl HistoricalStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, recommendation_key: &str) -> Option<&OutcomeRecord> {
        self.outcomes.get(recommendation_key)
    }

    /// Record an outcome under its recommendation identity. An existing
    /// entry is replaced, which makes re-grading a week idempotent.
    ///
    /// Unresolved outcomes leave the store untouched: the
    /// recommendation is retried on a later pass and must never be
    /// silently counted.
    pub fn apply(&mut self, recommendation: &Recommendation, outcome: &Outcome) {
        if outcome.result == BetResult::Unresolved {
            return;
        }
        self.outcomes.insert(
            outcome.recommendation_key.clone(),
            OutcomeRecord {
                outcome: outcome.clone(),
                classification: recommendation.classification,
                season: recommendation.season,
                week: recommendation.week,
            },
        );
    }

    pub fn overall(&self) -> Bucket {
        let mut bucket = Bucket::default();
        for record in self.outcomes.values() {
            bucket.add(record.outcome.result);
        }
        bucket
    }

    pub fn by_classification(&self) -> HashMap<Classification, Bucket> {
        let mut buckets: HashMap<Classification, Bucket> = HashMap::new();
        for record in self.outcomes.values() {
            buckets
                .entry(record.classification)
                .or_default()
                .add(record.outcome.result);
        }
        buckets
    }

    /// Per-week buckets for one season, in week order.
    pub fn by_week(&self, season: u16) -> BTreeMap<u8, Bucket> {
        let mut buckets: BTreeMap<u8, Bucket> = BTreeMap::new();
        for record in self.outcomes.values().filter(|r| r.season == season) {
            buckets
                .entry(record.week)
                .or_default()
                .add(record.outcome.result);
        }
        buckets
    }

    /// Load from a JSON file. A missing or unreadable store starts
    /// empty rather than aborting the run.
    pub fn load(path: Option<&str>) -> Self {
        let path = path.unwrap_or(DEFAULT_STATS_PATH);
        if !Path::new(path).exists() {
            return Self::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(stats) => stats,
                Err(err) => {
                    warn!("corrupt stats file {}, starting empty: {}", path, err);
                    Self::new()
                }
            },
            Err(err) => {
                warn!("unreadable stats file {}, starting empty: {}", path, err);
                Self::new()
            }
        }
    }

    /// Save to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: Option<&str>) -> Result<(), std::io::Error> {
        let path = path.unwrap_or(DEFAULT_STATS_PATH);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recommendation(week: u8, matchup: &str, bet: &str, tier: Classification) -> Recommendation {
        Recommendation {
            season: 2024,
            week,
            matchup: matchup.to_string(),
            bet_text: bet.to_string(),
            classification: tier,
            created_at: Utc::now(),
        }
    }

    fn outcome(rec: &Recommendation, result: BetResult) -> Outcome {
        Outcome {
            recommendation_key: rec.key(),
            matched_game: rec.matchup.clone(),
            result,
            final_score_summary: "31-17".to_string(),
            evaluated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_and_aggregate() {
        let mut stats = HistoricalStats::new();

        let win = recommendation(12, "Chiefs @ Bills", "KC -3.5", Classification::BlueChip);
        let loss = recommendation(12, "Packers @ Lions", "Over 52", Classification::Lean);
        let push = recommendation(13, "Eagles @ Cowboys", "PHI -3", Classification::BlueChip);

        stats.apply(&win, &outcome(&win, BetResult::Win));
        stats.apply(&loss, &outcome(&loss, BetResult::Loss));
        stats.apply(&push, &outcome(&push, BetResult::Push));

        let overall = stats.overall();
        assert_eq!(overall, Bucket { wins: 1, losses: 1, pushes: 1 });
        assert_eq!(overall.record(), "1-1-1");
        assert_eq!(overall.win_rate(), Some(0.5));

        let tiers = stats.by_classification();
        assert_eq!(tiers[&Classification::BlueChip].wins, 1);
        assert_eq!(tiers[&Classification::BlueChip].pushes, 1);
        assert_eq!(tiers[&Classification::Lean].losses, 1);

        let weeks = stats.by_week(2024);
        assert_eq!(weeks[&12].decided(), 2);
        assert_eq!(weeks[&13].pushes, 1);
    }

    #[test]
    fn test_reapplication_is_idempotent() {
        let mut stats = HistoricalStats::new();
        let rec = recommendation(12, "Chiefs @ Bills", "KC -3.5", Classification::BlueChip);
        let out = outcome(&rec, BetResult::Win);

        stats.apply(&rec, &out);
        let first = stats.overall();
        stats.apply(&rec, &out);
        assert_eq!(stats.overall(), first);
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn test_reevaluation_replaces() {
        // A corrected score feed flips the result; the record is
        // replaced, not double-counted.
        let mut stats = HistoricalStats::new();
        let rec = recommendation(12, "Chiefs @ Bills", "KC -3.5", Classification::BlueChip);

        stats.apply(&rec, &outcome(&rec, BetResult::Win));
        stats.apply(&rec, &outcome(&rec, BetResult::Loss));

        assert_eq!(stats.len(), 1);
        assert_eq!(stats.overall(), Bucket { wins: 0, losses: 1, pushes: 0 });
    }

    #[test]
    fn test_unresolved_leaves_store_untouched() {
        let mut stats = HistoricalStats::new();
        let rec = recommendation(12, "Squad X @ Squad Y", "KC -3.5", Classification::Lean);

        stats.apply(&rec, &outcome(&rec, BetResult::Unresolved));
        assert!(stats.is_empty());
    }

    #[test]
    fn test_win_rate_excludes_pushes() {
        let bucket = Bucket { wins: 3, losses: 1, pushes: 2 };
        assert_eq!(bucket.win_rate(), Some(0.75));
        assert_eq!(Bucket::default().win_rate(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("grading_stats_test");
        let path = dir.join("stats.json");
        let path = path.to_str().unwrap();

        let mut stats = HistoricalStats::new();
        let rec = recommendation(12, "Chiefs @ Bills", "KC -3.5", Classification::BlueChip);
        stats.apply(&rec, &outcome(&rec, BetResult::Win));
        stats.save(Some(path)).unwrap();

        let loaded = HistoricalStats::load(Some(path));
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.overall().wins, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let stats = HistoricalStats::load(Some("/nonexistent/grading_stats.json"));
        assert!(stats.is_empty());
    }
}
