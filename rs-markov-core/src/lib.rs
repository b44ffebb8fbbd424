//! Character-level Markov text generation library.
//!
//! This crate provides:
//! - A fixed-order model mapping context windows to next-character frequencies
//! - Training from any character source (strings, files)
//! - Weighted random generation, reproducible when seeded
//!
//! ```
//! use rs_markov_core::LanguageModel;
//!
//! let mut model = LanguageModel::with_seed(3, 20).unwrap();
//! model.train("abcabcabcabc".chars()).unwrap();
//! assert_eq!(model.generate("abc", 5), "abcabcab");
//! ```

/// Model construction settings.
pub mod config;

/// Error type and result alias.
pub mod error;

/// Character sources backed by files.
pub mod io;

/// Frequency tables and the language model itself.
pub mod model;

pub use config::{ModelConfig, DEFAULT_SEED};
pub use error::{ModelError, Result};
pub use model::frequency_table::{CharCount, CharDistribution};
pub use model::language_model::LanguageModel;
