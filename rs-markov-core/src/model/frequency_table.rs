use std::fmt;

use serde::Serialize;

/// Observed frequency of one character following a given window.
///
/// `p` and `cp` are derived fields: they stay at `0.0` until the owning
/// [`CharDistribution`] is normalized.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharCount {
	/// The character that followed the window.
	character: char,
	/// How many times it was observed. Always >= 1.
	count: usize,
	/// `count / total` of the owning distribution.
	p: f64,
	/// Running sum of `p` up to and including this entry.
	cp: f64,
}

impl CharCount {
	fn new(character: char) -> Self {
		Self::new_with_count(character, 1)
	}

	fn new_with_count(character: char, count: usize) -> Self {
		Self { character, count, p: 0.0, cp: 0.0 }
	}

	pub fn character(&self) -> char {
		self.character
	}

	pub fn count(&self) -> usize {
		self.count
	}

	/// Probability of this character after normalization.
	pub fn p(&self) -> f64 {
		self.p
	}

	/// Cumulative probability after normalization.
	pub fn cp(&self) -> f64 {
		self.cp
	}
}

impl fmt::Display for CharCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({} {} {} {})", self.character, self.count, self.p, self.cp)
	}
}

/// Every character observed after one context window, with its frequency.
///
/// Conceptually this is the outgoing edge set of a node in a Markov chain.
///
/// ## Invariants
/// - Entries keep first-observation order: new characters are appended,
///   never inserted or removed.
/// - Each character appears at most once.
/// - After [`normalize`](Self::normalize), `cp` is non-decreasing and the last
///   `cp` is 1.0 up to floating-point rounding.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct CharDistribution {
	entries: Vec<CharCount>,
}

impl CharDistribution {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `character`.
	///
	/// - If the character was already seen, its count is increased.
	/// - Otherwise, a new entry with a count of 1 is appended.
	pub fn update(&mut self, character: char) {
		match self.entries.iter_mut().find(|entry| entry.character == character) {
			Some(entry) => entry.count += 1,
			None => self.entries.push(CharCount::new(character)),
		}
	}

	/// Recomputes `p` and `cp` for every entry from the current counts.
	///
	/// Counts are left untouched, so calling this again after the same
	/// updates yields the same values. Call it once all updates of a
	/// training pass are done.
	pub fn normalize(&mut self) {
		let total = self.total() as f64;
		let mut cp = 0.0;
		for entry in &mut self.entries {
			entry.p = entry.count as f64 / total;
			cp += entry.p;
			entry.cp = cp;
		}
	}

	/// Picks a character using a uniform draw `random_unit` in `[0, 1)`.
	///
	/// Returns the first entry whose `cp` is strictly greater than the draw.
	/// If rounding left the last `cp` slightly under 1.0 and no entry
	/// qualifies, the last character is returned.
	///
	/// # Panics
	/// Panics if the distribution is empty. Distributions are only created on
	/// a first update, so this means the caller broke that contract.
	pub fn sample(&self, random_unit: f64) -> char {
		self.entries
			.iter()
			.find(|entry| entry.cp > random_unit)
			.or(self.entries.last())
			.map(|entry| entry.character)
			.expect("cannot sample from an empty distribution")
	}

	/// Adds the counts of `other` into this distribution.
	///
	/// Characters already present keep their position; characters only seen
	/// in `other` are appended in `other`'s order. Probabilities are not
	/// recomputed: call [`normalize`](Self::normalize) afterwards.
	pub fn merge(&mut self, other: &Self) {
		for incoming in &other.entries {
			match self.entries.iter_mut().find(|entry| entry.character == incoming.character) {
				Some(entry) => entry.count += incoming.count,
				None => self.entries.push(CharCount::new_with_count(incoming.character, incoming.count)),
			}
		}
	}

	/// Sum of all counts, i.e. how many times the window was observed.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|entry| entry.count).sum()
	}

	/// Entries in first-observation order.
	pub fn entries(&self) -> &[CharCount] {
		&self.entries
	}

	/// Looks up the entry for `character`, if it was observed.
	pub fn get(&self, character: char) -> Option<&CharCount> {
		self.entries.iter().find(|entry| entry.character == character)
	}

	/// Number of distinct characters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Display for CharDistribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, entry) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{entry}")?;
		}
		write!(f, ")")
	}
}
