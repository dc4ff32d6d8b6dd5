use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::tokenizer::preprocess;
use crate::error::Result;
use crate::io::read_file;

/// Character and character-pair occurrence counts of a training corpus.
///
/// Conceptually, every character is a node of a Markov chain and `bigrams`
/// stores the observed outgoing edges weighted by their number of
/// observations.
///
/// ## Responsibilities:
/// - Accumulate unigram counts for every character of every token
/// - Accumulate bigram counts for every adjacent pair inside a token
///
/// ## Invariants
/// - Every key of `bigrams` is also a key of `unigrams`
/// - Every stored count is strictly positive; absent keys mean zero
/// - For every `x`, the sum of `bigrams[x]` is at most `unigrams[x]`
///   (equal when `x` never ends a token)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FrequencyCounts {
	/// Occurrences of each character, sentinels included.
	unigrams: HashMap<char, usize>,
	/// Occurrences of each ordered pair, indexed by first then second character.
	/// Example: { 'a' => { 'b' => 2, 'l' => 1 } }
	bigrams: HashMap<char, HashMap<char, usize>>,
}

impl FrequencyCounts {
	/// Creates empty counts.
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts every token of a corpus file.
	///
	/// The file is read entirely, tokenized line by line and each line is
	/// visited exactly once.
	///
	/// # Errors
	/// Returns `LangIdError::Io` if the file cannot be opened or read.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let lines = read_file(&path)?;
		let counts = Self::from_lines(&lines);
		debug!(
			"counted {} characters ({} distinct) and {} bigrams in {}",
			counts.total_unigrams(),
			counts.vocabulary_size(),
			counts.total_bigrams(),
			path.as_ref().display()
		);
		Ok(counts)
	}

	/// Counts every token of an in-memory corpus, one record per line.
	pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
		let mut counts = Self::new();
		for line in lines {
			counts.add_line(line.as_ref());
		}
		counts
	}

	/// Tokenizes a line and records all of its tokens.
	pub fn add_line(&mut self, line: &str) {
		for token in preprocess(line) {
			self.add_token(&token);
		}
	}

	/// Records one token.
	///
	/// A token of `L` characters adds `L` unigram occurrences and `L - 1`
	/// bigram occurrences. Pairs spanning two tokens are never counted.
	pub fn add_token(&mut self, token: &str) {
		let mut previous: Option<char> = None;
		for current in token.chars() {
			*self.unigrams.entry(current).or_insert(0) += 1;
			if let Some(first) = previous {
				*self.bigrams.entry(first).or_default().entry(current).or_insert(0) += 1;
			}
			previous = Some(current);
		}
	}

	/// Returns the number of occurrences of `c`, 0 if it was never seen.
	pub fn unigram(&self, c: char) -> usize {
		self.unigrams.get(&c).copied().unwrap_or(0)
	}

	/// Returns the number of occurrences of `first` followed by `second`,
	/// 0 if the pair was never seen.
	pub fn bigram(&self, first: char, second: char) -> usize {
		self.bigrams
			.get(&first)
			.and_then(|followers| followers.get(&second))
			.copied()
			.unwrap_or(0)
	}

	/// Read-only view of the unigram counts.
	pub fn unigrams(&self) -> &HashMap<char, usize> {
		&self.unigrams
	}

	/// Read-only view of the bigram counts.
	pub fn bigrams(&self) -> &HashMap<char, HashMap<char, usize>> {
		&self.bigrams
	}

	/// Number of distinct characters seen so far (`V`).
	pub fn vocabulary_size(&self) -> usize {
		self.unigrams.len()
	}

	/// Total number of counted characters.
	pub fn total_unigrams(&self) -> usize {
		self.unigrams.values().sum()
	}

	/// Total number of counted pairs.
	pub fn total_bigrams(&self) -> usize {
		self.bigrams.values().flat_map(HashMap::values).sum()
	}

	/// Returns `true` if nothing was counted.
	pub fn is_empty(&self) -> bool {
		self.unigrams.is_empty()
	}

	/// Consumes the counts, returning the unigram map.
	pub(crate) fn into_unigrams(self) -> HashMap<char, usize> {
		self.unigrams
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_token_counts() {
		let mut counts = FrequencyCounts::new();
		counts.add_token("$abba$");

		assert_eq!(counts.unigram('$'), 2);
		assert_eq!(counts.unigram('a'), 2);
		assert_eq!(counts.unigram('b'), 2);
		assert_eq!(counts.bigram('$', 'a'), 1);
		assert_eq!(counts.bigram('b', 'b'), 1);
		assert_eq!(counts.bigram('a', '$'), 1);
		assert_eq!(counts.total_bigrams(), 5);
	}

	#[test]
	fn pairs_across_tokens_are_not_counted() {
		let counts = FrequencyCounts::from_lines(&["ab cd"]);
		assert_eq!(counts.bigram('$', '$'), 0);
		assert_eq!(counts.bigram('b', 'c'), 0);
		assert_eq!(counts.total_bigrams(), 6);
		assert_eq!(counts.total_unigrams(), 8);
	}

	#[test]
	fn absent_pairs_are_not_materialized() {
		let counts = FrequencyCounts::from_lines(&["ab"]);
		assert_eq!(counts.bigram('a', 'a'), 0);
		assert_eq!(counts.bigram('z', 'a'), 0);
		assert!(!counts.bigrams()[&'a'].contains_key(&'a'));
		assert!(!counts.bigrams().contains_key(&'z'));
		assert!(!counts.unigrams().contains_key(&'z'));
	}

	#[test]
	fn outgoing_pairs_never_exceed_unigram_count() {
		let counts = FrequencyCounts::from_lines(&["the cat sat on the mat", "a banana and an apple"]);
		for (first, followers) in counts.bigrams() {
			let outgoing: usize = followers.values().sum();
			assert!(outgoing <= counts.unigram(*first), "{first}: {outgoing}");
			assert!(counts.unigrams().contains_key(first));
		}
	}

	#[test]
	fn empty_corpus_has_empty_tables() {
		let counts = FrequencyCounts::from_lines(&["", "123", "..."]);
		assert!(counts.is_empty());
		assert!(counts.bigrams().is_empty());
		assert_eq!(counts.vocabulary_size(), 0);
	}
}
