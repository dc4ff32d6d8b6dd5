use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::counts::FrequencyCounts;
use crate::error::{LangIdError, Result};

/// Bigram transition probabilities derived from `FrequencyCounts`.
///
/// Only pairs observed at least once are materialized; lookups of any other
/// pair return `None` and are left to the caller's fallback policy.
///
/// # Invariants
/// - `table` has exactly one entry per distinct observed pair
/// - Linear values are in `(0, 1]`, log-space values are `<= 0`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProbabilityTable {
	/// Whether add-one smoothing was applied.
	smoothed: bool,
	/// Whether values are base-10 logarithms.
	log_space: bool,
	/// Vocabulary size used in the smoothing denominator.
	vocabulary_size: usize,
	/// Probability of the second character given the first.
	table: HashMap<char, HashMap<char, f64>>,
}

impl ProbabilityTable {
	/// Estimates the probability of every observed pair `(x, y)`.
	///
	/// - raw: `count(x, y) / unigram(x)`
	/// - smoothed (add-one): `(count(x, y) + 1) / (unigram(x) + V)`, where `V`
	///   is the number of distinct characters in `counts`
	/// - `log_space`: base-10 logarithm of whichever applies
	///
	/// # Errors
	/// Returns `LangIdError::UnknownCharacter` if a pair starts with a
	/// character that has no unigram count. `FrequencyCounts` never builds
	/// such counts, but the raw estimate would otherwise divide by zero.
	pub fn estimate(counts: &FrequencyCounts, smoothed: bool, log_space: bool) -> Result<Self> {
		let vocabulary_size = counts.vocabulary_size();
		let mut table: HashMap<char, HashMap<char, f64>> = HashMap::with_capacity(counts.bigrams().len());

		for (&first, followers) in counts.bigrams() {
			let unigram = counts.unigram(first);
			if unigram == 0 {
				return Err(LangIdError::UnknownCharacter(first));
			}

			let row = table.entry(first).or_default();
			for (&second, &count) in followers {
				let probability = if smoothed {
					(count + 1) as f64 / (unigram + vocabulary_size) as f64
				} else {
					count as f64 / unigram as f64
				};
				row.insert(second, if log_space { probability.log10() } else { probability });
			}
		}

		Ok(Self { smoothed, log_space, vocabulary_size, table })
	}

	/// Returns the stored value for `first` followed by `second`, if observed.
	pub fn get(&self, first: char, second: char) -> Option<f64> {
		self.table.get(&first)?.get(&second).copied()
	}

	/// Returns the stored value, or 0.0 for an unobserved pair.
	///
	/// Only meaningful for linear tables: in log space an unseen pair has no
	/// finite value.
	pub fn get_or_zero(&self, first: char, second: char) -> f64 {
		self.get(first, second).unwrap_or(0.0)
	}

	/// Whether add-one smoothing was applied.
	pub fn is_smoothed(&self) -> bool {
		self.smoothed
	}

	/// Whether values are base-10 logarithms.
	pub fn is_log_space(&self) -> bool {
		self.log_space
	}

	/// Vocabulary size captured at estimation time.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary_size
	}

	/// Number of materialized pairs.
	pub fn len(&self) -> usize {
		self.table.values().map(HashMap::len).sum()
	}

	/// Returns `true` if no pair was observed.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Iterates over `(first, second, value)` for every materialized pair.
	pub fn iter(&self) -> impl Iterator<Item = (char, char, f64)> + '_ {
		self.table
			.iter()
			.flat_map(|(&first, row)| row.iter().map(move |(&second, &value)| (first, second, value)))
	}
}
