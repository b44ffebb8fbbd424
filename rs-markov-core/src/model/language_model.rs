use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};

use super::frequency_table::CharDistribution;
use crate::error::{ModelError, Result};
use crate::io::FileChars;

/// Fixed-order character-level Markov model.
///
/// Maps every context window of exactly `window_length` characters seen in the
/// training corpus to the distribution of characters that followed it, and
/// generates text by weighted random sampling from those distributions.
///
/// # Responsibilities
/// - Scan a corpus once, counting the character following each window
/// - Normalize the counts into probabilities after the scan
/// - Extend a seed text character by character from the learned table
///
/// # Invariants
/// - `window_length` is always >= 1 and never changes
/// - Every key in `table` is exactly `window_length` characters long
/// - Every distribution in `table` holds at least one entry
/// - The random source is owned by the model; two models never share one
///
/// # Repeated training
/// Calling [`train`](Self::train) more than once does not reset the model:
/// counts from every pass accumulate in the same table, and probabilities are
/// recomputed from the combined counts. Generation after two passes over the
/// same corpus therefore matches a single pass over that corpus in
/// probabilities, but not in the sequence of random draws already consumed.
#[derive(Serialize, Debug)]
pub struct LanguageModel<R = StdRng> {
	/// Number of characters in a context window
	window_length: usize,

	/// Mapping from a context window to the characters observed after it
	#[serde(serialize_with = "sorted_table")]
	table: HashMap<String, CharDistribution>,

	/// Source of uniform draws in [0, 1)
	#[serde(skip)]
	rng: R,
}

impl LanguageModel<StdRng> {
	/// Creates a model whose generator is seeded with `seed`.
	///
	/// Two models built with the same seed and trained on the same corpus
	/// generate the same text for the same arguments.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidWindowLength`] if `window_length` is 0.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self> {
		debug!("creating model (window {window_length}, seed {seed})");
		Self::with_rng(window_length, StdRng::seed_from_u64(seed))
	}

	/// Creates a model whose generator is seeded from OS entropy.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidWindowLength`] if `window_length` is 0.
	pub fn from_entropy(window_length: usize) -> Result<Self> {
		debug!("creating model (window {window_length}, entropy seed)");
		Self::with_rng(window_length, StdRng::from_os_rng())
	}
}

impl<R: Rng> LanguageModel<R> {
	/// Creates an untrained model drawing from the given generator.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidWindowLength`] if `window_length` is 0.
	pub fn with_rng(window_length: usize, rng: R) -> Result<Self> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		Ok(Self { window_length, table: HashMap::new(), rng })
	}

	/// Trains the model on a character source.
	///
	/// Reads the first `window_length` characters as the initial window, then
	/// for every following character records it against the current window
	/// and slides the window forward by one. Once the source is exhausted,
	/// every distribution is normalized.
	///
	/// The source is consumed once, in order.
	///
	/// # Errors
	/// Returns [`ModelError::InsufficientInput`] if the source yields fewer
	/// than `window_length` characters. The model is left untouched.
	pub fn train<I>(&mut self, source: I) -> Result<()>
	where
		I: IntoIterator<Item = char>,
	{
		let partial = self.count_windows(source)?;
		self.absorb(partial);
		Ok(())
	}

	/// Trains the model on the contents of a UTF-8 text file.
	///
	/// Training is all-or-nothing: if the file cannot be read to the end, the
	/// model is left exactly as it was.
	///
	/// # Errors
	/// - [`ModelError::Io`] if the file cannot be opened or decoded
	/// - [`ModelError::InsufficientInput`] if the file is shorter than a window
	pub fn train_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let path = path.as_ref();
		let mut source = FileChars::open(path).map_err(|e| ModelError::io(e, path))?;

		let partial = self.count_windows(source.by_ref());
		source.finish().map_err(|e| ModelError::io(e, path))?;
		self.absorb(partial?);
		Ok(())
	}

	/// Counts the successors of every window in `source` into a fresh table.
	fn count_windows<I>(&self, source: I) -> Result<HashMap<String, CharDistribution>>
	where
		I: IntoIterator<Item = char>,
	{
		let mut chars = source.into_iter();

		let mut window: String = chars.by_ref().take(self.window_length).collect();
		let available = window.chars().count();
		if available < self.window_length {
			return Err(ModelError::InsufficientInput { window_length: self.window_length, available });
		}

		let mut partial: HashMap<String, CharDistribution> = HashMap::new();
		let mut consumed = available;
		for c in chars {
			match partial.get_mut(&window) {
				Some(dist) => dist.update(c),
				None => {
					let mut dist = CharDistribution::new();
					dist.update(c);
					partial.insert(window.clone(), dist);
				}
			}

			// Slide by one character (not one byte)
			window.remove(0);
			window.push(c);
			consumed += 1;
		}

		debug!("scanned {consumed} characters, {} distinct windows", partial.len());
		Ok(partial)
	}

	/// Merges freshly counted windows into the table and renormalizes it.
	fn absorb(&mut self, partial: HashMap<String, CharDistribution>) {
		for (window, dist) in partial {
			match self.table.get_mut(&window) {
				Some(existing) => existing.merge(&dist),
				None => {
					self.table.insert(window, dist);
				}
			}
		}

		for dist in self.table.values_mut() {
			dist.normalize();
		}
		debug!("model now holds {} distinct windows", self.table.len());
	}

	/// Generates text from the learned table.
	///
	/// - If `initial_text` is shorter than a window, it is returned unchanged.
	/// - Otherwise, the output starts with the last `window_length` characters
	///   of `initial_text` (not the whole text) and is extended by up to
	///   `target_length` sampled characters.
	/// - Generation stops early, without error, as soon as the current window
	///   was never seen during training.
	pub fn generate(&mut self, initial_text: &str, target_length: usize) -> String {
		let length = initial_text.chars().count();
		if length < self.window_length {
			return initial_text.to_owned();
		}

		let mut window: String = initial_text.chars().skip(length - self.window_length).collect();
		let mut result = window.clone();

		for generated in 0..target_length {
			let Some(dist) = self.table.get(&window) else {
				trace!("window {window:?} unknown, stopping after {generated} characters");
				break;
			};

			let c = dist.sample(self.rng.random::<f64>());
			result.push(c);
			window.remove(0);
			window.push(c);
		}

		result
	}
}

impl<R> LanguageModel<R> {
	/// Number of characters in a context window.
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows learned so far.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// `true` until a training pass has recorded at least one transition.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Distribution of characters observed after `window`, if any.
	pub fn distribution(&self, window: &str) -> Option<&CharDistribution> {
		self.table.get(window)
	}

	/// All learned windows, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.table.keys().map(String::as_str)
	}
}

/// One `window : distribution` line per learned window, sorted by window.
impl<R> fmt::Display for LanguageModel<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sorted: BTreeMap<&String, &CharDistribution> = self.table.iter().collect();
		for (window, dist) in sorted {
			writeln!(f, "{window} : {dist}")?;
		}
		Ok(())
	}
}

fn sorted_table<S: Serializer>(table: &HashMap<String, CharDistribution>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.collect_map(table.iter().collect::<BTreeMap<_, _>>())
}
