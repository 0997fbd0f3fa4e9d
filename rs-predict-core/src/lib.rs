//! Character-level n-gram word prediction library.
//!
//! This crate provides the statistical core of a typing assistant:
//! - Corpus normalization and character n-gram accumulation
//! - Greedy word completion with context backoff
//! - Smoothed scoring and top-k ranking of vocabulary words
//! - Corpus loading from a file or a directory
//!
//! A model is trained once at construction and is read-only afterward,
//! so it can be shared between any number of concurrent readers.

/// N-gram model, its configuration and the helpers around it.
pub mod model;

/// Error type returned by model construction and configuration.
pub mod error;

/// Corpus loading (single file or directory concatenation).
pub mod io;

pub use error::ModelError;
pub use model::config::{ModelConfig, ShortWordPolicy, TieBreak};
pub use model::ngram_model::{NgramModel, Prediction};
pub use model::typing::{TypingStats, typing_stats};
