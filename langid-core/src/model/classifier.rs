use std::path::Path;

use serde::{Deserialize, Serialize};

use super::language_model::LanguageModel;
use super::tokenizer::{tokenize_document, tokenize_file};
use crate::error::Result;

/// A `LanguageModel` tagged with the language it was trained on.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LabeledModel {
	/// Language identifier, for example `"en"`.
	pub label: String,
	/// Model trained on a corpus of that language.
	pub model: LanguageModel,
}

impl LabeledModel {
	pub fn new(label: impl Into<String>, model: LanguageModel) -> Self {
		Self { label: label.into(), model }
	}
}

/// Outcome of classifying one document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
	/// Label of the most likely language.
	pub label: String,
	/// Log-probability of the document under the first model.
	pub first_log_prob: f64,
	/// Log-probability of the document under the second model.
	pub second_log_prob: f64,
}

/// Two-language classifier.
///
/// Scores a document once against each model and picks the label of the
/// model giving the greater log-probability.
///
/// # Invariants
/// - Ties resolve to the first model
/// - Models are only read, so one classifier can be shared between threads
#[derive(Clone, Debug)]
pub struct Classifier {
	first: LabeledModel,
	second: LabeledModel,
}

impl Classifier {
	/// Creates a classifier; `first` wins ties.
	pub fn new(first: LabeledModel, second: LabeledModel) -> Self {
		Self { first, second }
	}

	/// Trains both models from their corpus files.
	///
	/// # Errors
	/// Returns `LangIdError::Io` if either corpus cannot be read.
	pub fn train<P1, P2>(first_label: &str, first_corpus: P1, second_label: &str, second_corpus: P2) -> Result<Self>
	where
		P1: AsRef<Path>,
		P2: AsRef<Path>,
	{
		Ok(Self::new(
			LabeledModel::new(first_label, LanguageModel::train(first_corpus)?),
			LabeledModel::new(second_label, LanguageModel::train(second_corpus)?),
		))
	}

	/// The model winning ties.
	pub fn first(&self) -> &LabeledModel {
		&self.first
	}

	/// The other model.
	pub fn second(&self) -> &LabeledModel {
		&self.second
	}

	/// Classifies an already tokenized document.
	pub fn predict<S: AsRef<str>>(&self, tokens: &[S]) -> Prediction {
		let first_log_prob = self.first.model.score(tokens);
		let second_log_prob = self.second.model.score(tokens);

		let label = if first_log_prob >= second_log_prob {
			&self.first.label
		} else {
			&self.second.label
		};

		Prediction { label: label.clone(), first_log_prob, second_log_prob }
	}

	/// Tokenizes a multi-line document and classifies it.
	pub fn predict_lines<S: AsRef<str>>(&self, lines: &[S]) -> Prediction {
		self.predict(&tokenize_document(lines))
	}

	/// Reads a document from disk and classifies it.
	///
	/// # Errors
	/// Returns `LangIdError::Io` if the document cannot be read.
	pub fn predict_file<P: AsRef<Path>>(&self, path: P) -> Result<Prediction> {
		Ok(self.predict(&tokenize_file(path)?))
	}

	/// Returns the label of the most likely language.
	pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> String {
		self.predict(tokens).label
	}
}
