//! Character-bigram language identification library.
//!
//! This crate provides a small document-level language identifier including:
//! - Line tokenization into sentinel-bounded lowercase words
//! - Unigram / bigram frequency counting over a training corpus
//! - Add-one smoothed, log-space bigram probability estimation
//! - Log-likelihood scoring and two-language classification
//! - Evaluation of a labeled test folder
//!
//! The core operations are pure: they read their input files, return values
//! and never install a logger or print anything.

/// Language models, scoring and classification.
///
/// Exposes the tokenizer, the frequency counter, the probability estimator,
/// the trained `LanguageModel`, the two-class `Classifier` and the evaluator.
pub mod model;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (file loading, folder listing).
///
/// Not exposed
pub(crate) mod io;

pub use error::{LangIdError, Result};
