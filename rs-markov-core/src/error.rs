//! Error type shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = ModelError> = std::result::Result<T, E>;

/// Failures surfaced by model construction and training.
///
/// Generation never fails: an unknown window simply ends the output early.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The window length must be at least one character.
	#[error("invalid window length {0}: must be at least 1")]
	InvalidWindowLength(usize),

	/// The corpus ended before a full initial window could be read.
	#[error("corpus too short: need at least {window_length} characters, got {available}")]
	InsufficientInput {
		/// Configured window length of the model.
		window_length: usize,
		/// Number of characters the source produced before running dry.
		available: usize,
	},

	/// The corpus file could not be opened or decoded.
	#[error("io error while reading {path:?}: {source}")]
	Io {
		source: std::io::Error,
		path: PathBuf,
	},
}

impl ModelError {
	/// Wraps an IO error with the path it happened on.
	pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
		Self::Io { source, path: path.into() }
	}
}
