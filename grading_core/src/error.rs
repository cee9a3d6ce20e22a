//! Error taxonomy for the grading core.
//!
//! Every variant is recoverable: a failure grades the affected
//! recommendation as Unresolved and the batch continues.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// Team reference matched no franchise, or matched more than one.
    /// Ambiguity is reported rather than guessed.
    #[error("could not resolve team from '{text}': {reason}")]
    UnresolvedTeam { text: String, reason: String },

    /// The parser found no recognizable bet leg.
    #[error("no recognizable bet leg in '{0}'")]
    MalformedBetText(String),

    /// No completed game in the score set matched the matchup.
    #[error("no completed game found for '{matchup}' in week {week}")]
    GameNotFound { week: u8, matchup: String },

    /// More than one completed game matched; surfaced, never resolved
    /// to the first hit.
    #[error("{candidates} completed games match '{matchup}' in week {week}")]
    AmbiguousGameMatch {
        week: u8,
        matchup: String,
        candidates: usize,
    },

    /// The game exists but is not final yet; retried on a later pass.
    #[error("game '{matchup}' in week {week} is not final yet")]
    IncompleteGame { week: u8, matchup: String },
}
