//! Win/loss/push classification for parsed bets.

use crate::error::GradeError;
use crate::models::{BetResult, FinalScore, LineType, ParsedBet, TotalDirection};
use crate::teams;

/// Grade a parsed bet against a matched final score.
///
/// The match over `LineType` is exhaustive so new line types fail
/// closed: `Unknown` grades as Unresolved, never numerically.
pub fn evaluate(bet: &ParsedBet, game: &FinalScore) -> Result<BetResult, GradeError> {
    match bet.line_type {
        LineType::Spread => {
            let (side, value) = spread_inputs(bet)?;
            grade_spread(side, value, game)
        }
        LineType::Total => {
            let (direction, value) = total_inputs(bet)?;
            Ok(grade_total(direction, value, game))
        }
        LineType::SpreadAndTotal => {
            let (side, spread_value) = spread_inputs(bet)?;
            let (direction, total_value) = total_inputs(bet)?;
            let spread = grade_spread(side, spread_value, game)?;
            let total = grade_total(direction, total_value, game);
            Ok(combine_legs(spread, total))
        }
        LineType::Unknown => Ok(BetResult::Unresolved),
    }
}

/// Required-field checks: a spread bet with a missing side or value is
/// malformed, not defaulted.
fn spread_inputs(bet: &ParsedBet) -> Result<(&str, f64), GradeError> {
    match (bet.side_team.as_deref(), bet.spread_value) {
        (Some(side), Some(value)) => Ok((side, value)),
        _ => Err(GradeError::MalformedBetText(bet.raw_text.clone())),
    }
}

fn total_inputs(bet: &ParsedBet) -> Result<(TotalDirection, f64), GradeError> {
    match (bet.total_direction, bet.total_value) {
        (Some(direction), Some(value)) => Ok((direction, value)),
        _ => Err(GradeError::MalformedBetText(bet.raw_text.clone())),
    }
}

/// margin = side score + spread - opponent score. Lines are half-point
/// multiples, so the zero comparison is exact.
fn grade_spread(side: &str, spread: f64, game: &FinalScore) -> Result<BetResult, GradeError> {
    let side = teams::normalize(side)?;
    let home = teams::normalize(&game.home_team)?;
    let away = teams::normalize(&game.away_team)?;

    let (side_score, opponent_score) = if side.id == home.id {
        (game.home_score, game.away_score)
    } else if side.id == away.id {
        (game.away_score, game.home_score)
    } else {
        return Err(GradeError::UnresolvedTeam {
            text: side.id.to_string(),
            reason: format!(
                "not in matched game {} @ {}",
                game.away_team, game.home_team
            ),
        });
    };

    let margin = f64::from(side_score) + spread - f64::from(opponent_score);
    Ok(if margin > 0.0 {
        BetResult::Win
    } else if margin < 0.0 {
        BetResult::Loss
    } else {
        BetResult::Push
    })
}

fn grade_total(direction: TotalDirection, line: f64, game: &FinalScore) -> BetResult {
    let total = f64::from(game.total_points());
    if total == line {
        return BetResult::Push;
    }
    let over = total > line;
    match direction {
        TotalDirection::Over if over => BetResult::Win,
        TotalDirection::Under if !over => BetResult::Win,
        _ => BetResult::Loss,
    }
}

/// Combination grading: any losing leg loses the bet; both legs must
/// win for a win; a push on either leg degrades a would-be win to a
/// push, matching standard parlay handling of pushed legs.
pub(crate) fn combine_legs(a: BetResult, b: BetResult) -> BetResult {
    use BetResult::*;
    match (a, b) {
        (Unresolved, _) | (_, Unresolved) => Unresolved,
        (Loss, _) | (_, Loss) => Loss,
        (Win, Win) => Win,
        _ => Push,
    }
}
