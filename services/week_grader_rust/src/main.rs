//! Week Grader Service
//!
//! Responsibilities:
//! - Load a week's logged recommendations (JSON export)
//! - Load the week's final scores from the score feed export (JSON)
//! - Grade every recommendation through grading_core
//! - Persist the updated historical store
//! - Print per-recommendation results and tier performance
//!
//! Thin adapter only: all parsing, matching, and evaluation live in
//! grading_core.

use anyhow::{Context, Result};
use chrono::Datelike;
use dotenv::dotenv;
use grading_core::{grade_week, Classification, FinalScore, HistoricalStats, Recommendation};
use log::warn;
use std::env;
use std::fs;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
struct Config {
    recommendations_file: String,
    scores_file: String,
    stats_file: String,
}

impl Config {
    fn from_env(week: u8) -> Self {
        Self {
            recommendations_file: env::var("RECOMMENDATIONS_FILE").unwrap_or_else(|_| {
                format!("data/week{week}/week{week}_recommendations.json")
            }),
            scores_file: env::var("SCORES_FILE")
                .unwrap_or_else(|_| format!("data/week{week}/week{week}_scores.json")),
            stats_file: env::var("STATS_FILE")
                .unwrap_or_else(|_| "data/historical/grading_stats.json".to_string()),
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {path}"))
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1);
    let week: u8 = args
        .next()
        .context("usage: week_grader <week> [season]")?
        .parse()
        .context("week must be a number (1-18)")?;
    let season: u16 = match args.next() {
        Some(arg) => arg.parse().context("season must be a year")?,
        None => match env::var("SEASON") {
            Ok(value) => value.parse().context("SEASON must be a year")?,
            Err(_) => chrono::Utc::now().year() as u16,
        },
    };

    let config = Config::from_env(week);

    let recommendations: Vec<Recommendation> = load_json(&config.recommendations_file)?;

    // Missing or partial score data is not fatal: affected
    // recommendations grade as unresolved and are retried next pass.
    let scores: Vec<FinalScore> = match load_json(&config.scores_file) {
        Ok(scores) => scores,
        Err(err) => {
            warn!("{err:#}; grading without scores");
            Vec::new()
        }
    };

    let mut stats = HistoricalStats::load(Some(&config.stats_file));
    let summary = grade_week(season, week, &recommendations, &scores, &mut stats);
    stats
        .save(Some(&config.stats_file))
        .with_context(|| format!("failed to write {}", config.stats_file))?;

    println!("Week {week} ({season}): {}", summary.record());
    if let Some(rate) = summary.win_rate() {
        println!("Win rate: {:.1}%", rate * 100.0);
    }
    if summary.unresolved > 0 {
        println!("Unresolved (manual follow-up): {}", summary.unresolved);
    }
    println!();

    for graded in &summary.graded {
        println!(
            "  [{}] {} - {} ({})",
            graded.result, graded.matchup, graded.bet_text, graded.detail
        );
    }

    println!();
    println!("All-time by tier:");
    let tiers = stats.by_classification();
    for tier in Classification::ALL {
        if let Some(bucket) = tiers.get(&tier) {
            match bucket.win_rate() {
                Some(rate) => println!(
                    "  {}: {} ({:.1}%)",
                    tier,
                    bucket.record(),
                    rate * 100.0
                ),
                None => println!("  {}: {}", tier, bucket.record()),
            }
        }
    }
    let overall = stats.overall();
    if let Some(rate) = overall.win_rate() {
        println!("  overall: {} ({:.1}%)", overall.record(), rate * 100.0);
    }

    Ok(())
}
