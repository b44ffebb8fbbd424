//! Top-level module for the character-level Markov model.
//!
//! This module provides:
//! - Per-window character frequencies (`CharDistribution`)
//! - The fixed-order model with training and generation (`LanguageModel`)

/// Observed next-character counts for one context window.
///
/// Converts counts into probabilities and cumulative probabilities,
/// and samples a character from a uniform draw.
pub mod frequency_table;

/// Fixed-order character model (`window_length >= 1`).
///
/// Handles corpus scanning, normalization, and seeded or
/// entropy-based text generation.
pub mod language_model;
