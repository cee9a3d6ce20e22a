//! Bet outcome resolution and historical performance tracking.
//!
//! This crate provides:
//! - Canonical NFL team name resolution with abbreviation and alias tables
//! - Free-text bet recommendation parsing (spread, total, combination)
//! - Final-score matching tolerant of name variants and ordering
//! - Win/loss/push outcome evaluation with conservative push handling
//! - Idempotent historical aggregation keyed by recommendation identity
//!
//! The core is synchronous and batch-oriented: one week's
//! recommendations against one week's scores per invocation. Score
//! retrieval, report delivery, and scheduling are external
//! collaborators.

pub mod engine;
pub mod error;
pub mod evaluate;
pub mod matcher;
pub mod models;
pub mod parse;
pub mod stats;
pub mod teams;

pub use engine::{grade_week, GradedRecommendation, WeekSummary};
pub use error::GradeError;
pub use models::{
    BetResult, Classification, FinalScore, LineType, Outcome, ParsedBet, Recommendation,
    TotalDirection,
};
pub use stats::{Bucket, HistoricalStats, OutcomeRecord};
