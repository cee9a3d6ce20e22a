//! Free-text bet recommendation parsing.
//!
//! Recognizes spread legs ("KC -3.5"), total legs ("Over 47.5"), and
//! combinations joined by "/", "and", or a spaced "+". Anything else
//! parses to `LineType::Unknown` with the raw text retained; unknown
//! bets are never graded numerically.

use crate::models::{LineType, ParsedBet, TotalDirection};
use regex::Regex;
use std::sync::OnceLock;

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "/" may be tight ("KC -3.5/Over 47.5"); "and" and "+" must be
    // spaced so a spread sign is not mistaken for a separator.
    RE.get_or_init(|| Regex::new(r"(?i)\s*/\s*|\s+and\s+|\s+\+\s+").expect("valid separator regex"))
}

fn total_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(over|under)\s+(\d+(?:\.\d+)?)$").expect("valid total regex"))
}

fn spread_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)\s*([+-]\d+(?:\.\d+)?)$").expect("valid spread regex"))
}

/// Betting lines land on whole or half points. Anything else is a
/// feed artifact, not a line.
fn is_half_point(value: f64) -> bool {
    (value * 2.0).fract() == 0.0
}

/// Recommendations the analytics side logs as explicit non-plays.
/// These are skipped before grading, never counted.
pub fn is_no_play(text: &str) -> bool {
    let upper = text.to_uppercase();
    ["PASS", "FADE", "AVOID", "NO BET", "LANDMINE"]
        .iter()
        .any(|word| upper.contains(word))
}

/// Extract structured bet intent from free text. Legs are
/// order-independent; duplicate leg kinds, off-grid line values, or
/// unrecognized tokens degrade the whole bet to `Unknown` rather than
/// fabricating a guess.
pub fn parse(bet_text: &str) -> ParsedBet {
    let raw = bet_text.trim();
    if raw.is_empty() {
        return ParsedBet::unknown(raw);
    }

    let mut spread: Option<(String, f64)> = None;
    let mut total: Option<(TotalDirection, f64)> = None;

    for leg in separator_re().split(raw) {
        let leg = leg.trim();
        if leg.is_empty() {
            continue;
        }

        if let Some(caps) = total_re().captures(leg) {
            let value: f64 = match caps[2].parse() {
                Ok(v) => v,
                Err(_) => return ParsedBet::unknown(raw),
            };
            if !is_half_point(value) || total.is_some() {
                return ParsedBet::unknown(raw);
            }
            let direction = if caps[1].eq_ignore_ascii_case("over") {
                TotalDirection::Over
            } else {
                TotalDirection::Under
            };
            total = Some((direction, value));
        } else if let Some(caps) = spread_re().captures(leg) {
            let team = caps[1].trim().to_string();
            let value: f64 = match caps[2].parse() {
                Ok(v) => v,
                Err(_) => return ParsedBet::unknown(raw),
            };
            if team.is_empty() || !is_half_point(value) || spread.is_some() {
                return ParsedBet::unknown(raw);
            }
            spread = Some((team, value));
        } else {
            return ParsedBet::unknown(raw);
        }
    }

    match (spread, total) {
        (Some((team, value)), None) => ParsedBet {
            side_team: Some(team),
            line_type: LineType::Spread,
            spread_value: Some(value),
            total_value: None,
            total_direction: None,
            raw_text: raw.to_string(),
        },
        (None, Some((direction, value))) => ParsedBet {
            side_team: None,
            line_type: LineType::Total,
            spread_value: None,
            total_value: Some(value),
            total_direction: Some(direction),
            raw_text: raw.to_string(),
        },
        (Some((team, spread_value)), Some((direction, total_value))) => ParsedBet {
            side_team: Some(team),
            line_type: LineType::SpreadAndTotal,
            spread_value: Some(spread_value),
            total_value: Some(total_value),
            total_direction: Some(direction),
            raw_text: raw.to_string(),
        },
        (None, None) => ParsedBet::unknown(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_only() {
        let bet = parse("KC -3.5");
        assert_eq!(bet.line_type, LineType::Spread);
        assert_eq!(bet.side_team.as_deref(), Some("KC"));
        assert_eq!(bet.spread_value, Some(-3.5));
        assert_eq!(bet.total_value, None);
    }

    #[test]
    fn test_underdog_spread() {
        let bet = parse("Bills +7");
        assert_eq!(bet.line_type, LineType::Spread);
        assert_eq!(bet.side_team.as_deref(), Some("Bills"));
        assert_eq!(bet.spread_value, Some(7.0));
    }

    #[test]
    fn test_total_only() {
        let bet = parse("Over 47.5");
        assert_eq!(bet.line_type, LineType::Total);
        assert_eq!(bet.total_direction, Some(TotalDirection::Over));
        assert_eq!(bet.total_value, Some(47.5));
        assert_eq!(bet.side_team, None);

        let bet = parse("under 41");
        assert_eq!(bet.total_direction, Some(TotalDirection::Under));
        assert_eq!(bet.total_value, Some(41.0));
    }

    #[test]
    fn test_combination_slash() {
        let bet = parse("KC -3.5 / Over 47.5");
        assert_eq!(bet.line_type, LineType::SpreadAndTotal);
        assert_eq!(bet.side_team.as_deref(), Some("KC"));
        assert_eq!(bet.spread_value, Some(-3.5));
        assert_eq!(bet.total_value, Some(47.5));
        assert_eq!(bet.total_direction, Some(TotalDirection::Over));
    }

    #[test]
    fn test_combination_legs_are_order_independent() {
        let a = parse("GB -3 / Over 44");
        let b = parse("Over 44 / GB -3");
        assert_eq!(a.line_type, LineType::SpreadAndTotal);
        assert_eq!(a.spread_value, b.spread_value);
        assert_eq!(a.total_value, b.total_value);
        assert_eq!(a.side_team, b.side_team);
    }

    #[test]
    fn test_combination_word_separators() {
        let bet = parse("GB -3 and Under 44.5");
        assert_eq!(bet.line_type, LineType::SpreadAndTotal);
        assert_eq!(bet.total_direction, Some(TotalDirection::Under));

        let bet = parse("Chiefs -7 + Over 50");
        assert_eq!(bet.line_type, LineType::SpreadAndTotal);
        assert_eq!(bet.spread_value, Some(-7.0));
    }

    #[test]
    fn test_off_grid_line_is_unknown() {
        // Quarter-point lines do not exist; never fabricate a value.
        let bet = parse("KC -3.25");
        assert_eq!(bet.line_type, LineType::Unknown);
        assert_eq!(bet.raw_text, "KC -3.25");

        let bet = parse("Over 47.3");
        assert_eq!(bet.line_type, LineType::Unknown);
    }

    #[test]
    fn test_duplicate_leg_kind_is_unknown() {
        assert_eq!(parse("KC -3.5 / BUF +3.5").line_type, LineType::Unknown);
        assert_eq!(parse("Over 44 / Under 47").line_type, LineType::Unknown);
    }

    #[test]
    fn test_unrecognized_text_is_unknown() {
        let bet = parse("take the points");
        assert_eq!(bet.line_type, LineType::Unknown);
        assert_eq!(bet.raw_text, "take the points");

        assert_eq!(parse("").line_type, LineType::Unknown);
        assert_eq!(parse("-3.5").line_type, LineType::Unknown);
    }

    #[test]
    fn test_no_play_detection() {
        assert!(is_no_play("PASS"));
        assert!(is_no_play("Fade this line"));
        assert!(is_no_play("avoid"));
        assert!(!is_no_play("KC -3.5"));
        assert!(!is_no_play("Over 47.5"));
    }
}
