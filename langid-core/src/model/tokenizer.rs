use std::path::Path;

use crate::error::Result;
use crate::io::read_file;

/// Symbol placed before and after every token.
///
/// It keeps bigrams from leaking across word boundaries and lets the model
/// learn which characters start and end words.
pub const SENTINEL: char = '$';

/// Number of symbols a token can contain: 26 lowercase letters and `SENTINEL`.
pub const ALPHABET_SIZE: usize = 27;

/// Tokenizes one line of raw text.
///
/// # Behavior
/// - Strips trailing whitespace (including the line terminator)
/// - Lower-cases every character
/// - Removes everything that is not an ASCII lowercase letter or a space;
///   digits, punctuation, tabs and accented letters disappear, so
///   `"well-known"` becomes `"wellknown"`
/// - Splits on whitespace and wraps each word with `SENTINEL` on both sides
///
/// A line without any letter yields an empty vector.
///
/// # Notes
/// The bigram counts and every numeric expectation derived from them depend on
/// this exact preprocessing.
pub fn preprocess(line: &str) -> Vec<String> {
	let cleaned: String = line
		.trim_end()
		.chars()
		.flat_map(char::to_lowercase)
		.filter(|c| c.is_ascii_lowercase() || *c == ' ')
		.collect();

	cleaned
		.split_whitespace()
		.map(|word| {
			let mut token = String::with_capacity(word.len() + 2);
			token.push(SENTINEL);
			token.push_str(word);
			token.push(SENTINEL);
			token
		})
		.collect()
}

/// Tokenizes a whole document, line by line.
///
/// Tokens of every line are concatenated in order; lines producing no token
/// contribute nothing.
pub fn tokenize_document<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
	lines.iter().flat_map(|line| preprocess(line.as_ref())).collect()
}

/// Reads a document from disk and tokenizes it with `tokenize_document`.
///
/// # Errors
/// Returns `LangIdError::Io` if the file cannot be opened or read.
pub fn tokenize_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
	Ok(tokenize_document(&read_file(path)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wraps_words_with_sentinels() {
		assert_eq!(preprocess("Hello World\n"), vec!["$hello$", "$world$"]);
	}

	#[test]
	fn strips_digits_and_punctuation() {
		assert_eq!(preprocess("alphabet has 26 letters!"), vec!["$alphabet$", "$has$", "$letters$"]);
	}

	#[test]
	fn fuses_hyphenated_and_apostrophe_words() {
		assert_eq!(preprocess("well-known don't"), vec!["$wellknown$", "$dont$"]);
	}

	#[test]
	fn tabs_are_removed_not_split() {
		assert_eq!(preprocess("ab\tcd"), vec!["$abcd$"]);
	}

	#[test]
	fn accented_letters_are_dropped() {
		assert_eq!(preprocess("Mañana está"), vec!["$maana$", "$est$"]);
	}

	#[test]
	fn lines_without_letters_yield_nothing() {
		assert!(preprocess("").is_empty());
		assert!(preprocess("   \n").is_empty());
		assert!(preprocess("42 -- 17 !!").is_empty());
	}

	#[test]
	fn document_skips_empty_lines() {
		let lines = ["The cat.", "", "  ", "A dog"];
		assert_eq!(tokenize_document(&lines), vec!["$the$", "$cat$", "$a$", "$dog$"]);
	}

	#[test]
	fn file_is_tokenized_line_by_line() {
		let file = tempfile::NamedTempFile::new().unwrap();
		std::fs::write(file.path(), "Hola, mundo.\n\n¿Qué tal?\n").unwrap();
		assert_eq!(tokenize_file(file.path()).unwrap(), vec!["$hola$", "$mundo$", "$qu$", "$tal$"]);
	}
}
