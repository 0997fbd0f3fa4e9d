//! Top-level module for the word prediction system.
//!
//! This module groups:
//! - The character n-gram model (`NgramModel`)
//! - Per-context transition counts (`State`)
//! - Construction parameters (`ModelConfig`)
//! - Corpus normalization and cursor/word helpers
//! - Typing effort statistics

/// Character n-gram model: training, backoff, generation, scoring and ranking.
pub mod ngram_model;

/// Tunable parameters of a model, fixed at construction.
pub mod config;

/// Corpus normalization and tokenization.
pub mod corpus;

/// Locating and replacing the word under a text cursor.
pub mod cursor;

/// Typing effort statistics (letters and tab presses per word).
pub mod typing;

/// Internal representation of a single context row.
///
/// Tracks next-character counts and their running total.
/// This module is not exposed publicly.
mod state;
