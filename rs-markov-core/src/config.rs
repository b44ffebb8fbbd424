//! Construction settings for a [`LanguageModel`].

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::language_model::LanguageModel;

/// Seed used for reproducible runs when none is given explicitly.
pub const DEFAULT_SEED: u64 = 20;

/// How to build a language model.
///
/// `seed` selects the random source: `Some` gives a deterministic generator,
/// `None` seeds from OS entropy. Neither can be changed once the model exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
	/// Number of characters in a context window. Must be >= 1.
	pub window_length: usize,
	/// Seed for reproducible generation, or `None` for entropy.
	pub seed: Option<u64>,
}

impl ModelConfig {
	/// Deterministic configuration.
	pub fn seeded(window_length: usize, seed: u64) -> Self {
		Self { window_length, seed: Some(seed) }
	}

	/// Non-deterministic configuration.
	pub fn entropy(window_length: usize) -> Self {
		Self { window_length, seed: None }
	}

	/// Checks the invariants required to build a model.
	pub fn validate(&self) -> Result<()> {
		if self.window_length == 0 {
			return Err(ModelError::InvalidWindowLength(self.window_length));
		}
		Ok(())
	}

	/// Builds an untrained model from this configuration.
	pub fn build(&self) -> Result<LanguageModel> {
		self.validate()?;
		match self.seed {
			Some(seed) => LanguageModel::with_seed(self.window_length, seed),
			None => LanguageModel::from_entropy(self.window_length),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_window_fails_validation() {
		let err = ModelConfig::seeded(0, 1).validate().unwrap_err();
		assert!(matches!(err, ModelError::InvalidWindowLength(0)));
		assert!(ModelConfig::entropy(0).build().is_err());
	}

	#[test]
	fn build_keeps_window_length() {
		let model = ModelConfig::entropy(7).build().unwrap();
		assert_eq!(model.window_length(), 7);
		assert!(model.is_empty());
	}

	#[test]
	fn seeded_configs_build_identical_generators() {
		let config = ModelConfig::seeded(2, DEFAULT_SEED);
		let corpus = "to be or not to be, that is the question";
		let mut a = config.build().unwrap();
		let mut b = config.build().unwrap();
		a.train(corpus.chars()).unwrap();
		b.train(corpus.chars()).unwrap();
		assert_eq!(a.generate("to", 100), b.generate("to", 100));
	}
}
