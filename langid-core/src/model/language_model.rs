use std::collections::HashMap;
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::counts::FrequencyCounts;
use super::estimator::ProbabilityTable;
use super::tokenizer::{ALPHABET_SIZE, preprocess};
use crate::error::Result;

/// A trained character-bigram language model.
///
/// The `LanguageModel` pairs the unigram counts of a corpus with its add-one
/// smoothed, base-10 log bigram table and scores token sequences against it.
///
/// # Responsibilities
/// - Train from a corpus file or from in-memory counts
/// - Compute the log-likelihood of a token sequence
/// - Fall back to the smoothed probability of an unseen event for pairs
///   absent from the table
///
/// # Invariants
/// - `vocabulary_size` is captured once at training time and never changes
/// - Scoring takes `&self`: a model has no mutation path after construction
/// - Every table value is `<= 0`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LanguageModel {
	/// Occurrences of each training character.
	unigrams: HashMap<char, usize>,
	/// Number of distinct training characters (`V`), frozen.
	vocabulary_size: usize,
	/// Smoothed log-probabilities of the observed pairs.
	bigram_log_probs: ProbabilityTable,
}

impl LanguageModel {
	/// Trains a model from a corpus file.
	///
	/// Counts the corpus, then estimates smoothed log probabilities.
	///
	/// # Errors
	/// Returns `LangIdError::Io` if the corpus cannot be read.
	pub fn train<P: AsRef<Path>>(path: P) -> Result<Self> {
		let counts = FrequencyCounts::from_file(&path)?;
		let model = Self::from_counts(counts)?;
		debug!(
			"trained model from {}: V = {}, {} bigrams",
			path.as_ref().display(),
			model.vocabulary_size,
			model.bigram_log_probs.len()
		);
		Ok(model)
	}

	/// Builds a model from already accumulated counts.
	///
	/// An empty corpus yields an empty model: every pair then goes through
	/// the unseen-event fallback.
	pub fn from_counts(counts: FrequencyCounts) -> Result<Self> {
		let bigram_log_probs = ProbabilityTable::estimate(&counts, true, true)?;
		let vocabulary_size = counts.vocabulary_size();
		Ok(Self {
			unigrams: counts.into_unigrams(),
			vocabulary_size,
			bigram_log_probs,
		})
	}

	/// Returns the training count of `c`, 0 if it was never seen.
	///
	/// Lookups never insert, so scoring unseen characters leaves `V` intact.
	pub fn unigram(&self, c: char) -> usize {
		self.unigrams.get(&c).copied().unwrap_or(0)
	}

	/// Vocabulary size captured at training time.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary_size
	}

	/// Read-only view of the smoothed log-probability table.
	pub fn bigram_log_probs(&self) -> &ProbabilityTable {
		&self.bigram_log_probs
	}

	/// Log-probability of `second` following `first`.
	///
	/// Uses the stored value when the pair was observed; otherwise applies
	/// add-one smoothing with a zero pair count:
	/// `log10(1 / (unigram(first) + V))`.
	///
	/// A model trained on an empty corpus has `V = 0`; it then smooths over
	/// the full `ALPHABET_SIZE` so every pair stays strictly negative.
	pub fn log_prob(&self, first: char, second: char) -> f64 {
		match self.bigram_log_probs.get(first, second) {
			Some(log_prob) => log_prob,
			None => {
				trace!("unseen bigram {first:?}{second:?}, smoothing on the fly");
				let vocabulary_size = if self.vocabulary_size == 0 { ALPHABET_SIZE } else { self.vocabulary_size };
				(1.0 / (self.unigram(first) + vocabulary_size) as f64).log10()
			}
		}
	}

	/// Total log-probability of a token sequence.
	///
	/// Adds the log-probability of every adjacent character pair inside each
	/// token. Values stay in log space for the whole sum, so long documents
	/// do not underflow. An empty sequence scores 0.
	pub fn score<S: AsRef<str>>(&self, tokens: &[S]) -> f64 {
		tokens.iter().map(|token| self.score_token(token.as_ref())).sum()
	}

	/// Tokenizes a line of text and scores it.
	pub fn score_text(&self, text: &str) -> f64 {
		self.score(&preprocess(text))
	}

	fn score_token(&self, token: &str) -> f64 {
		let mut log_prob = 0.0;
		let mut chars = token.chars();
		if let Some(mut previous) = chars.next() {
			for current in chars {
				log_prob += self.log_prob(previous, current);
				previous = current;
			}
		}
		log_prob
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn model() -> LanguageModel {
		LanguageModel::from_counts(FrequencyCounts::from_lines(&["aab ab", "ba"])).unwrap()
	}

	#[test]
	fn empty_sequence_scores_zero() {
		let tokens: [&str; 0] = [];
		assert_eq!(model().score(&tokens), 0.0);
		assert_eq!(model().score_text("1234 !"), 0.0);
	}

	#[test]
	fn observed_pair_uses_table() {
		let model = model();
		// (2 + 1) / (4 + 3)
		assert!((model.log_prob('a', 'b') - (3.0f64 / 7.0).log10()).abs() < 1e-12);
	}

	#[test]
	fn unseen_pair_of_known_character() {
		let model = model();
		// 'b' occurs 3 times, never followed by 'b'
		assert!((model.log_prob('b', 'b') - (1.0f64 / 6.0).log10()).abs() < 1e-12);
	}

	#[test]
	fn unknown_character_uses_zero_count_and_keeps_vocabulary() {
		let model = model();
		let before = model.clone();

		assert!((model.log_prob('z', 'a') - (1.0f64 / 3.0).log10()).abs() < 1e-12);
		let score = model.score(&["$zzz$"]);
		assert!(score.is_finite());

		assert_eq!(model.vocabulary_size(), 3);
		assert_eq!(model.unigram('z'), 0);
		assert_eq!(model, before);
	}

	#[test]
	fn score_is_sum_over_tokens() {
		let model = model();
		let joint = model.score(&["$ab$", "$ba$"]);
		let split = model.score(&["$ab$"]) + model.score(&["$ba$"]);
		assert!((joint - split).abs() < 1e-12);
		assert!(joint < 0.0);
	}

	#[test]
	fn empty_model_scores_through_fallback() {
		let model = LanguageModel::from_counts(FrequencyCounts::new()).unwrap();
		assert_eq!(model.vocabulary_size(), 0);
		assert!(model.bigram_log_probs().is_empty());

		// 12 pairs, each log10(1 / 27)
		let score = model.score_text("hello world");
		assert!(score.is_finite());
		assert!(score < 0.0);
		assert!((score - 12.0 * (1.0f64 / 27.0).log10()).abs() < 1e-9);
		assert_eq!(model.vocabulary_size(), 0);
	}

	#[test]
	fn corpus_without_letters_scores_finite() {
		let model = LanguageModel::from_counts(FrequencyCounts::from_lines(&["", "42 ..."])).unwrap();
		let score = model.score(&["$abc$"]);
		assert!(score.is_finite());
		assert!(score < 0.0);
	}
}
