//! Top-level module for the bigram language identifier.
//!
//! This module provides a two-language document classifier, including:
//! - Line and document tokenization (`tokenizer`)
//! - Corpus frequency counting (`FrequencyCounts`)
//! - Bigram probability estimation (`ProbabilityTable`)
//! - Trained, read-only models and scoring (`LanguageModel`)
//! - Two-class classification (`Classifier`)
//! - Labeled test-set evaluation (`Evaluator`)

/// Turns raw text into sentinel-bounded lowercase word tokens.
pub mod tokenizer;

/// Unigram and bigram counts of a corpus.
///
/// Counts are purely additive and only cover pairs inside a token.
pub mod counts;

/// Raw, add-one smoothed and log-space bigram probability tables.
///
/// Only observed pairs are materialized.
pub mod estimator;

/// Trained character-bigram model.
///
/// Owns the frozen vocabulary size and scores token sequences in log space,
/// smoothing unseen bigrams on the fly.
pub mod language_model;

/// Two-language classifier built on a pair of `LanguageModel`s.
pub mod classifier;

/// Accuracy measurement over a folder of labeled test documents.
///
/// Documents are scored on a pool of worker threads sharing the read-only
/// models.
pub mod evaluation;

pub use classifier::{Classifier, LabeledModel, Prediction};
pub use counts::FrequencyCounts;
pub use estimator::ProbabilityTable;
pub use evaluation::{DocumentResult, EvaluationInput, EvaluationReport, Evaluator, predict_and_evaluate};
pub use language_model::LanguageModel;
pub use tokenizer::{ALPHABET_SIZE, SENTINEL, preprocess, tokenize_document, tokenize_file};
