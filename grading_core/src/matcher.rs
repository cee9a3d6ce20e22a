//! Reconcile a recommendation's matchup text against the week's scores.
//!
//! Both team references resolve through the franchise table, so the
//! matchup and the score feed can name the same team differently
//! ("KC" vs "Kansas City Chiefs") or list it on the other side of
//! the separator.

use crate::error::GradeError;
use crate::models::FinalScore;
use crate::teams::{self, Franchise};
use log::debug;

/// Split matchup text into its two franchises. Accepts "@", "at",
/// "vs", and "vs." separators, away side first.
pub fn parse_matchup(matchup: &str) -> Result<(&'static Franchise, &'static Franchise), GradeError> {
    let norm = matchup
        .to_lowercase()
        .replace(" at ", " @ ")
        .replace(" vs. ", " @ ")
        .replace(" vs ", " @ ");

    let mut sides = norm.split('@');
    let (away, home) = match (sides.next(), sides.next(), sides.next()) {
        (Some(away), Some(home), None) => (away, home),
        _ => {
            return Err(GradeError::UnresolvedTeam {
                text: matchup.to_string(),
                reason: "matchup must name exactly two teams".to_string(),
            })
        }
    };

    Ok((teams::normalize(away)?, teams::normalize(home)?))
}

/// Locate the completed game for a matchup within the week's score set.
///
/// The home/away pair must equal the two normalized franchises in
/// either order. Zero candidates is `GameNotFound` (or `IncompleteGame`
/// when the only pairing is not final yet); more than one is
/// `AmbiguousGameMatch`, surfaced rather than resolved to the first hit.
pub fn find_game<'a>(
    week: u8,
    matchup: &str,
    scores: &'a [FinalScore],
) -> Result<&'a FinalScore, GradeError> {
    let (first, second) = parse_matchup(matchup)?;

    let mut incomplete = false;
    let mut hits: Vec<&FinalScore> = Vec::new();

    for score in scores.iter().filter(|s| s.week == week) {
        let (Ok(home), Ok(away)) = (
            teams::normalize(&score.home_team),
            teams::normalize(&score.away_team),
        ) else {
            debug!(
                "skipping unreadable score record: {} @ {}",
                score.away_team, score.home_team
            );
            continue;
        };

        let pair_matches = (home.id == first.id && away.id == second.id)
            || (home.id == second.id && away.id == first.id);
        if !pair_matches {
            continue;
        }
        if !score.completed {
            incomplete = true;
            continue;
        }
        hits.push(score);
    }

    match hits.len() {
        1 => Ok(hits[0]),
        0 if incomplete => Err(GradeError::IncompleteGame {
            week,
            matchup: matchup.to_string(),
        }),
        0 => Err(GradeError::GameNotFound {
            week,
            matchup: matchup.to_string(),
        }),
        candidates => Err(GradeError::AmbiguousGameMatch {
            week,
            matchup: matchup.to_string(),
            candidates,
        }),
    }
}
