use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, Prediction};
use crate::error::{LangIdError, Result};
use crate::io::{get_filename, list_files};

/// Sentences whose log-probability under the first model is logged after training.
pub const PROBE_SENTENCES: [&str; 3] = ["alphabet has 26 letters", "this is a dummy sentence", "blah blah"];

/// Evaluation parameters.
///
/// # Responsibilities
/// - Name the two languages; the test folder holds one sub-folder per label
/// - Bound the number of worker threads scoring documents
/// - List the sentences probed once the models are trained
#[derive(Clone, Debug)]
pub struct EvaluationInput {
	/// Labels of the first and second language. The first one wins ties.
	labels: [String; 2],

	/// Number of worker threads (0 = number of logical CPUs).
	pub threads: usize,

	/// Sentences scored against the first model for diagnostics.
	pub probe_sentences: Vec<String>,
}

impl Default for EvaluationInput {
	/// English first, Spanish second, one worker per CPU.
	fn default() -> Self {
		Self::new("en", "es")
	}
}

impl EvaluationInput {
	/// Creates an input for two labels with default parameters.
	pub fn new(first_label: impl Into<String>, second_label: impl Into<String>) -> Self {
		Self {
			labels: [first_label.into(), second_label.into()],
			threads: 0,
			probe_sentences: PROBE_SENTENCES.iter().map(|s| (*s).to_owned()).collect(),
		}
	}

	/// Returns the two labels, tie winner first.
	pub fn labels(&self) -> &[String; 2] {
		&self.labels
	}

	/// Resolves `threads`, replacing 0 by the number of logical CPUs.
	pub fn worker_count(&self) -> usize {
		if self.threads == 0 { num_cpus::get() } else { self.threads }
	}
}

/// Classification of one test document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DocumentResult {
	/// Label of the folder the document was found in.
	pub expected: String,
	/// File name, without its folder.
	pub file: String,
	/// What the classifier predicted.
	pub prediction: Prediction,
}

impl DocumentResult {
	/// Whether the predicted label matches the folder label.
	pub fn is_correct(&self) -> bool {
		self.prediction.label == self.expected
	}
}

/// Outcome of an evaluation run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EvaluationReport {
	/// Per-document results, in label order then file name order.
	pub documents: Vec<DocumentResult>,
	/// Number of correctly classified documents.
	pub correct: usize,
	/// Number of classified documents.
	pub total: usize,
	/// `correct / total`.
	pub accuracy: f64,
}

impl EvaluationReport {
	fn new(documents: Vec<DocumentResult>) -> Self {
		let correct = documents.iter().filter(|d| d.is_correct()).count();
		let total = documents.len();
		Self { documents, correct, total, accuracy: correct as f64 / total as f64 }
	}
}

/// Trains two models and measures how well they separate a labeled test set.
pub struct Evaluator {
	classifier: Classifier,
	input: EvaluationInput,
}

impl Evaluator {
	/// Wraps an already trained classifier.
	///
	/// The classifier's labels are used; `input` only provides the runtime
	/// parameters.
	pub fn new(classifier: Classifier, input: EvaluationInput) -> Self {
		let labels = [classifier.first().label.clone(), classifier.second().label.clone()];
		Self { classifier, input: EvaluationInput { labels, ..input } }
	}

	/// Trains the first model from `first_corpus` and the second from
	/// `second_corpus`, then logs the probe sentences.
	///
	/// # Errors
	/// Returns `LangIdError::Io` if a corpus cannot be read.
	pub fn train<P1, P2>(first_corpus: P1, second_corpus: P2, input: EvaluationInput) -> Result<Self>
	where
		P1: AsRef<Path>,
		P2: AsRef<Path>,
	{
		let [first_label, second_label] = input.labels();
		let classifier = Classifier::train(first_label, first_corpus, second_label, second_corpus)?;

		for sentence in &input.probe_sentences {
			debug!(
				"Log probability of '{}': {:.2}",
				sentence,
				classifier.first().model.score_text(sentence)
			);
		}

		Ok(Self { classifier, input })
	}

	/// The trained classifier.
	pub fn classifier(&self) -> &Classifier {
		&self.classifier
	}

	/// Classifies every document of `test_folder/<label>` for both labels.
	///
	/// # Behavior
	/// - Lists the regular files of each label folder
	/// - Splits them into chunks scored by scoped worker threads; the models
	///   are shared read-only
	/// - Collects results over a channel and restores label / file order
	/// - Logs one `file<TAB>prediction` line per document
	///
	/// # Errors
	/// - `LangIdError::NotADirectory` if a label folder is missing
	/// - `LangIdError::Io` if a document cannot be read
	/// - `LangIdError::EmptyTestSet` if no document was found
	/// - `LangIdError::WorkerPanicked` if a worker thread panicked
	pub fn evaluate<P: AsRef<Path>>(&self, test_folder: P) -> Result<EvaluationReport> {
		let test_folder = test_folder.as_ref();

		let mut jobs: Vec<(String, PathBuf)> = Vec::new();
		for label in self.input.labels() {
			for path in list_files(test_folder.join(label))? {
				jobs.push((label.clone(), path));
			}
		}
		if jobs.is_empty() {
			return Err(LangIdError::EmptyTestSet(test_folder.to_path_buf()));
		}

		let predictions = self.predict_all(&jobs)?;

		let mut documents = Vec::with_capacity(jobs.len());
		let mut current_label: Option<&str> = None;
		for ((expected, path), prediction) in jobs.iter().zip(predictions) {
			if current_label != Some(expected.as_str()) {
				if current_label.is_some() {
					info!("");
				}
				info!("Prediction for *{}* documents:", expected);
				current_label = Some(expected.as_str());
			}

			let file = get_filename(path);
			info!("{}\t{}", file, prediction.label);
			documents.push(DocumentResult { expected: expected.clone(), file, prediction });
		}
		info!("");

		let report = EvaluationReport::new(documents);
		debug!("{} / {} documents correctly classified", report.correct, report.total);
		Ok(report)
	}

	/// Scores every job on the worker pool, returning predictions in job order.
	fn predict_all(&self, jobs: &[(String, PathBuf)]) -> Result<Vec<Prediction>> {
		let workers = self.input.worker_count().max(1);
		let chunk_size = jobs.len().div_ceil(workers).max(1);
		let classifier = &self.classifier;

		let (tx, rx) = mpsc::channel();
		let joined: Vec<thread::Result<()>> = thread::scope(|scope| {
			let handles: Vec<_> = jobs
				.chunks(chunk_size)
				.enumerate()
				.map(|(chunk_index, chunk)| {
					let tx = tx.clone();
					scope.spawn(move || {
						let partial: Vec<(usize, Result<Prediction>)> = chunk
							.iter()
							.enumerate()
							.map(|(offset, (_, path))| (chunk_index * chunk_size + offset, classifier.predict_file(path)))
							.collect();
						// The receiver outlives the scope
						let _ = tx.send(partial);
					})
				})
				.collect();
			handles.into_iter().map(|handle| handle.join()).collect()
		});
		drop(tx);

		if joined.iter().any(|outcome| outcome.is_err()) {
			return Err(LangIdError::WorkerPanicked);
		}

		let mut indexed: Vec<(usize, Result<Prediction>)> = rx.iter().flatten().collect();
		indexed.sort_by_key(|(index, _)| *index);
		indexed.into_iter().map(|(_, prediction)| prediction).collect()
	}
}

/// Trains an English and a Spanish model and returns the accuracy reached on
/// `test_folder/en` and `test_folder/es`.
///
/// # Errors
/// See `Evaluator::train` and `Evaluator::evaluate`.
pub fn predict_and_evaluate<P1, P2, P3>(english_corpus: P1, spanish_corpus: P2, test_folder: P3) -> Result<f64>
where
	P1: AsRef<Path>,
	P2: AsRef<Path>,
	P3: AsRef<Path>,
{
	let evaluator = Evaluator::train(english_corpus, spanish_corpus, EvaluationInput::default())?;
	Ok(evaluator.evaluate(test_folder)?.accuracy)
}
