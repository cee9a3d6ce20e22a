//! Canonical NFL team name resolution.
//!
//! This module provides:
//! - Static franchise table for all 32 NFL teams
//! - Abbreviation, city, and nickname lookup with a fixed precedence
//! - Conservative fuzzy fallback for near-miss single tokens
//!
//! Resolution never guesses: any stage that matches two or more
//! franchises fails with `UnresolvedTeam`.

use crate::error::GradeError;
use std::collections::HashMap;
use std::sync::OnceLock;
use strsim::jaro_winkler;

/// One NFL franchise. The nickname doubles as the canonical id.
#[derive(Debug)]
pub struct Franchise {
    /// Canonical id, lowercase nickname (e.g. "chiefs").
    pub id: &'static str,
    /// Lowercase city or region (e.g. "kansas city").
    pub city: &'static str,
    /// Known abbreviations, including historical codes still seen in feeds.
    pub abbrs: &'static [&'static str],
    /// Extra nicknames beyond the canonical id.
    pub aliases: &'static [&'static str],
}

impl Franchise {
    /// "city nickname" display form, e.g. "kansas city chiefs".
    pub fn canonical_name(&self) -> String {
        format!("{} {}", self.city, self.id)
    }
}

/// All 32 franchises. Abbreviations fold historical codes onto the
/// current franchise (OAK -> raiders, SD -> chargers, STL -> rams).
pub static FRANCHISES: &[Franchise] = &[
    Franchise { id: "cardinals", city: "arizona", abbrs: &["ari", "az"], aliases: &["cards"] },
    Franchise { id: "falcons", city: "atlanta", abbrs: &["atl"], aliases: &[] },
    Franchise { id: "ravens", city: "baltimore", abbrs: &["bal"], aliases: &[] },
    Franchise { id: "bills", city: "buffalo", abbrs: &["buf"], aliases: &[] },
    Franchise { id: "panthers", city: "carolina", abbrs: &["car"], aliases: &[] },
    Franchise { id: "bears", city: "chicago", abbrs: &["chi"], aliases: &[] },
    Franchise { id: "bengals", city: "cincinnati", abbrs: &["cin"], aliases: &[] },
    Franchise { id: "browns", city: "cleveland", abbrs: &["cle"], aliases: &[] },
    Franchise { id: "cowboys", city: "dallas", abbrs: &["dal"], aliases: &[] },
    Franchise { id: "broncos", city: "denver", abbrs: &["den"], aliases: &[] },
    Franchise { id: "lions", city: "detroit", abbrs: &["det"], aliases: &[] },
    Franchise { id: "packers", city: "green bay", abbrs: &["gb"], aliases: &[] },
    Franchise { id: "texans", city: "houston", abbrs: &["hou"], aliases: &[] },
    Franchise { id: "colts", city: "indianapolis", abbrs: &["ind"], aliases: &[] },
    Franchise { id: "jaguars", city: "jacksonville", abbrs: &["jax", "jac"], aliases: &["jags"] },
    Franchise { id: "chiefs", city: "kansas city", abbrs: &["kc"], aliases: &[] },
    Franchise { id: "raiders", city: "las vegas", abbrs: &["lv", "oak"], aliases: &[] },
    Franchise { id: "chargers", city: "los angeles", abbrs: &["lac", "sd"], aliases: &["la chargers"] },
    Franchise { id: "rams", city: "los angeles", abbrs: &["lar", "stl"], aliases: &["la rams"] },
    Franchise { id: "dolphins", city: "miami", abbrs: &["mia"], aliases: &[] },
    Franchise { id: "vikings", city: "minnesota", abbrs: &["min"], aliases: &[] },
    Franchise { id: "patriots", city: "new england", abbrs: &["ne", "nwe"], aliases: &["pats"] },
    Franchise { id: "saints", city: "new orleans", abbrs: &["no", "nor"], aliases: &[] },
    Franchise { id: "giants", city: "new york", abbrs: &["nyg"], aliases: &["ny giants"] },
    Franchise { id: "jets", city: "new york", abbrs: &["nyj"], aliases: &["ny jets"] },
    Franchise { id: "eagles", city: "philadelphia", abbrs: &["phi"], aliases: &["philly"] },
    Franchise { id: "steelers", city: "pittsburgh", abbrs: &["pit"], aliases: &[] },
    Franchise { id: "49ers", city: "san francisco", abbrs: &["sf"], aliases: &["niners"] },
    Franchise { id: "seahawks", city: "seattle", abbrs: &["sea"], aliases: &[] },
    Franchise { id: "buccaneers", city: "tampa bay", abbrs: &["tb"], aliases: &["bucs"] },
    Franchise { id: "titans", city: "tennessee", abbrs: &["ten"], aliases: &[] },
    Franchise { id: "commanders", city: "washington", abbrs: &["was", "wsh"], aliases: &["football team"] },
];

/// Abbreviation index, built once on first lookup.
static ABBR_INDEX: OnceLock<HashMap<&'static str, &'static Franchise>> = OnceLock::new();

fn abbr_index() -> &'static HashMap<&'static str, &'static Franchise> {
    ABBR_INDEX.get_or_init(|| {
        let mut map = HashMap::new();
        for franchise in FRANCHISES {
            for abbr in franchise.abbrs {
                map.insert(*abbr, franchise);
            }
        }
        map
    })
}

/// Lowercase, strip punctuation, collapse whitespace.
fn normalize_text(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if text contains phrase as whole words, not as a substring of
/// another word.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    let text_words: Vec<&str> = text.split_whitespace().collect();
    let phrase_words: Vec<&str> = phrase.split_whitespace().collect();

    if phrase_words.is_empty() {
        return false;
    }
    if phrase_words.len() > 1 {
        return text_words
            .windows(phrase_words.len())
            .any(|window| window == phrase_words.as_slice());
    }
    text_words.contains(&phrase_words[0])
}

/// One resolution stage: exactly one hit wins, two or more is an
/// ambiguity error, zero falls through to the next stage.
fn resolve_stage(
    text: &str,
    hits: Vec<&'static Franchise>,
) -> Option<Result<&'static Franchise, GradeError>> {
    match hits.len() {
        0 => None,
        1 => Some(Ok(hits[0])),
        _ => Some(Err(GradeError::UnresolvedTeam {
            text: text.to_string(),
            reason: format!("ambiguous between {} and {}", hits[0].id, hits[1].id),
        })),
    }
}

/// Resolve arbitrary text referencing one NFL franchise to its canonical
/// entry. Pure, case-insensitive, punctuation-stripped.
///
/// Matching order: exact canonical name, abbreviation, city substring,
/// nickname substring, then a high-threshold fuzzy pass for single
/// tokens. Ambiguity at any stage is an error, never a guess.
pub fn normalize(text: &str) -> Result<&'static Franchise, GradeError> {
    let norm = normalize_text(text);
    if norm.is_empty() {
        return Err(GradeError::UnresolvedTeam {
            text: text.to_string(),
            reason: "empty team reference".to_string(),
        });
    }

    // 1. Exact canonical match (nickname id or "city nickname").
    let hits: Vec<_> = FRANCHISES
        .iter()
        .filter(|f| norm == f.id || norm == f.canonical_name())
        .collect();
    if let Some(resolved) = resolve_stage(text, hits) {
        return resolved;
    }

    // 2. Abbreviation table.
    if let Some(franchise) = abbr_index().get(norm.as_str()).copied() {
        return Ok(franchise);
    }

    // 3. City substring, whole words either direction ("kansas city
    //    chiefs money" contains the city; "kansas" is contained by it).
    let hits: Vec<_> = FRANCHISES
        .iter()
        .filter(|f| contains_phrase(&norm, f.city) || contains_phrase(f.city, &norm))
        .collect();
    if let Some(resolved) = resolve_stage(text, hits) {
        return resolved;
    }

    // 4. Nickname substring, including extra aliases.
    let hits: Vec<_> = FRANCHISES
        .iter()
        .filter(|f| {
            contains_phrase(&norm, f.id)
                || f.aliases
                    .iter()
                    .any(|alias| norm == *alias || contains_phrase(&norm, alias))
        })
        .collect();
    if let Some(resolved) = resolve_stage(text, hits) {
        return resolved;
    }

    // 5. Fuzzy last resort, single tokens only with a very high
    //    threshold to avoid false positives.
    if !norm.contains(' ') && norm.len() >= 6 {
        let hits: Vec<_> = FRANCHISES
            .iter()
            .filter(|f| jaro_winkler(&norm, f.id) > 0.95)
            .collect();
        if let Some(resolved) = resolve_stage(text, hits) {
            return resolved;
        }
    }

    Err(GradeError::UnresolvedTeam {
        text: text.to_string(),
        reason: "no franchise matched".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_32_franchises() {
        assert_eq!(FRANCHISES.len(), 32);
    }

    #[test]
    fn test_canonical_round_trip() {
        for franchise in FRANCHISES {
            assert_eq!(normalize(franchise.id).unwrap().id, franchise.id);
            assert_eq!(
                normalize(&franchise.canonical_name()).unwrap().id,
                franchise.id
            );
        }
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(normalize("KC").unwrap().id, "chiefs");
        assert_eq!(normalize("GB").unwrap().id, "packers");
        assert_eq!(normalize("SF").unwrap().id, "49ers");
        // Historical codes fold onto the current franchise.
        assert_eq!(normalize("OAK").unwrap().id, "raiders");
        assert_eq!(normalize("SD").unwrap().id, "chargers");
        assert_eq!(normalize("WAS").unwrap().id, "commanders");
        assert_eq!(normalize("WSH").unwrap().id, "commanders");
    }

    #[test]
    fn test_city_only() {
        assert_eq!(normalize("Buffalo").unwrap().id, "bills");
        assert_eq!(normalize("Green Bay").unwrap().id, "packers");
        assert_eq!(normalize("Detroit").unwrap().id, "lions");
        assert_eq!(normalize("Washington Football Team").unwrap().id, "commanders");
    }

    #[test]
    fn test_nickname_in_text() {
        assert_eq!(normalize("the Niners").unwrap().id, "49ers");
        assert_eq!(normalize("Pats").unwrap().id, "patriots");
        assert_eq!(normalize("LA Chargers").unwrap().id, "chargers");
    }

    #[test]
    fn test_ambiguous_city_is_an_error() {
        // Two franchises share each of these cities.
        assert!(normalize("New York").is_err());
        assert!(normalize("Los Angeles").is_err());
    }

    #[test]
    fn test_case_and_punctuation() {
        assert_eq!(normalize("  ChIeFs!! ").unwrap().id, "chiefs");
        assert_eq!(normalize("San Francisco 49ers").unwrap().id, "49ers");
    }

    #[test]
    fn test_fuzzy_single_token() {
        // One dropped letter still resolves.
        assert_eq!(normalize("buccaneer").unwrap().id, "buccaneers");
        // Short tokens never go through the fuzzy pass.
        assert!(normalize("chfs").is_err());
    }

    #[test]
    fn test_unresolvable() {
        let err = normalize("Squad X").unwrap_err();
        assert!(matches!(err, GradeError::UnresolvedTeam { .. }));
        assert!(normalize("").is_err());
        assert!(normalize("!!").is_err());
    }
}
