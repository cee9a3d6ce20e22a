//! One-week batch grading.
//!
//! Each recommendation is resolved independently: parse the bet text,
//! match the final score, evaluate, and fold the outcome into the
//! historical store. Every failure is recoverable and grades that one
//! recommendation as Unresolved; a single bad record never aborts the
//! batch.

use crate::error::GradeError;
use crate::models::{BetResult, Classification, FinalScore, LineType, Outcome, Recommendation};
use crate::stats::HistoricalStats;
use crate::{evaluate, matcher, parse};
use chrono::Utc;
use log::{debug, info, warn};
use serde::Serialize;

/// Per-recommendation grading result for the batch report.
#[derive(Clone, Debug, Serialize)]
pub struct GradedRecommendation {
    pub matchup: String,
    pub bet_text: String,
    pub classification: Classification,
    pub result: BetResult,
    /// Final score summary, or the reason the bet is unresolved.
    pub detail: String,
}

/// Batch summary for one week's run. Unresolved items are counted here
/// for manual follow-up; they are not written to the historical store.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WeekSummary {
    pub season: u16,
    pub week: u8,
    pub graded: Vec<GradedRecommendation>,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub unresolved: u32,
    /// Explicit no-play recommendations skipped before grading.
    pub skipped: u32,
}

impl WeekSummary {
    pub fn record(&self) -> String {
        if self.pushes > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.pushes)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }

    pub fn win_rate(&self) -> Option<f64> {
        match self.wins + self.losses {
            0 => None,
            decided => Some(f64::from(self.wins) / f64::from(decided)),
        }
    }
}

/// Grade one week's recommendations against its score set, updating
/// the historical store in place.
///
/// The store mutation is one logical transaction per invocation; the
/// caller must not run overlapping weeks concurrently.
pub fn grade_week(
    season: u16,
    week: u8,
    recommendations: &[Recommendation],
    scores: &[FinalScore],
    stats: &mut HistoricalStats,
) -> WeekSummary {
    let mut summary = WeekSummary {
        season,
        week,
        ..Default::default()
    };

    for rec in recommendations
        .iter()
        .filter(|r| r.season == season && r.week == week)
    {
        if parse::is_no_play(&rec.bet_text) {
            debug!("skipping no-play recommendation: {}", rec.matchup);
            summary.skipped += 1;
            continue;
        }

        let (result, detail) = resolve_one(rec, scores, stats);
        match result {
            BetResult::Win => summary.wins += 1,
            BetResult::Loss => summary.losses += 1,
            BetResult::Push => summary.pushes += 1,
            BetResult::Unresolved => summary.unresolved += 1,
        }
        summary.graded.push(GradedRecommendation {
            matchup: rec.matchup.clone(),
            bet_text: rec.bet_text.clone(),
            classification: rec.classification,
            result,
            detail,
        });
    }

    info!(
        "week {} graded: {} ({} unresolved, {} skipped)",
        week,
        summary.record(),
        summary.unresolved,
        summary.skipped
    );
    summary
}

fn resolve_one(
    rec: &Recommendation,
    scores: &[FinalScore],
    stats: &mut HistoricalStats,
) -> (BetResult, String) {
    let parsed = parse::parse(&rec.bet_text);
    if parsed.line_type == LineType::Unknown {
        let err = GradeError::MalformedBetText(rec.bet_text.clone());
        warn!("{}: {}", rec.matchup, err);
        return (BetResult::Unresolved, err.to_string());
    }

    let game = match matcher::find_game(rec.week, &rec.matchup, scores) {
        Ok(game) => game,
        Err(err) => {
            warn!("{}: {}", rec.matchup, err);
            return (BetResult::Unresolved, err.to_string());
        }
    };

    let result = match evaluate::evaluate(&parsed, game) {
        Ok(result) => result,
        Err(err) => {
            warn!("{}: {}", rec.matchup, err);
            return (BetResult::Unresolved, err.to_string());
        }
    };

    let outcome = Outcome {
        recommendation_key: rec.key(),
        matched_game: format!("{} @ {}", game.away_team, game.home_team),
        result,
        final_score_summary: game.summary(),
        evaluated_at: Utc::now(),
    };
    stats.apply(rec, &outcome);

    (result, game.summary())
}
