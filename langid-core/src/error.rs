use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while training, scoring or evaluating language models.
#[derive(Debug, Error)]
pub enum LangIdError {
	/// A corpus, document or folder could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A path expected to be a folder is not one.
	#[error("expected a directory, got: {}", .0.display())]
	NotADirectory(PathBuf),

	/// A bigram starts with a character that has no unigram count.
	///
	/// Counting always records both, so this means the counts were assembled
	/// inconsistently.
	#[error("character {0:?} has bigram counts but no unigram count")]
	UnknownCharacter(char),

	/// The labeled test folder contains no document.
	#[error("no test document found under {}", .0.display())]
	EmptyTestSet(PathBuf),

	/// A scoring worker thread panicked during evaluation.
	#[error("an evaluation worker panicked")]
	WorkerPanicked,
}

impl LangIdError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LangIdError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn io_error_mentions_the_path() {
		let error = LangIdError::io(
			"data/missing.txt",
			std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
		);
		let message = error.to_string();
		assert!(message.contains("data/missing.txt"));
		assert!(message.contains("not found"));
	}

	#[test]
	fn unknown_character_display() {
		let error = LangIdError::UnknownCharacter('q');
		assert_eq!(error.to_string(), "character 'q' has bigram counts but no unigram count");
	}

	#[test]
	fn io_error_exposes_its_source() {
		use std::error::Error as _;

		let error = LangIdError::io("x", std::io::Error::other("boom"));
		assert!(error.source().is_some());
	}
}
