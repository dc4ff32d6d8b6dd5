use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use langid_core::model::{EvaluationInput, Evaluator};

/// Train two character-bigram language models and measure how well they
/// classify a folder of labeled test documents.
#[derive(Parser, Debug)]
#[command(name = "langid", version)]
struct Args {
    /// Path to file with English training files
    #[arg(value_name = "PATH_TR_EN")]
    path_tr_en: PathBuf,

    /// Path to file with Spanish training files
    #[arg(value_name = "PATH_TR_ES")]
    path_tr_es: PathBuf,

    /// Path to folder with test files (one sub-folder per label)
    #[arg(value_name = "PATH_TEST")]
    path_test: PathBuf,

    /// Labels of the two training corpora, also the test sub-folder names
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"], default_values = ["en", "es"])]
    labels: Vec<String>,

    /// Worker threads used to score test documents (0 = all CPUs)
    #[arg(long, env = "LANGID_THREADS", default_value_t = 0)]
    threads: usize,

    /// Print the full evaluation report as JSON instead of the accuracy
    #[arg(long)]
    json: bool,

    /// Show training statistics and probe sentence scores
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print the result
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Log level implied by the flags; `RUST_LOG` still takes precedence.
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    fn evaluation_input(&self) -> EvaluationInput {
        let mut input = EvaluationInput::new(&self.labels[0], &self.labels[1]);
        input.threads = self.threads;
        input
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let evaluator = Evaluator::train(&args.path_tr_en, &args.path_tr_es, args.evaluation_input())
        .context("Failed to train the language models")?;

    let report = evaluator
        .evaluate(&args.path_test)
        .with_context(|| format!("Failed to evaluate {}", args.path_test.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Accuracy: {}", report.accuracy);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level());

    if let Err(error) = run(&args) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn default_labels_and_level() {
        let args = Args::try_parse_from(["langid", "en.txt", "es.txt", "test"]).unwrap();
        assert_eq!(args.labels, vec!["en", "es"]);
        assert_eq!(args.log_level(), LevelFilter::Info);
        assert_eq!(args.evaluation_input().labels(), &["en".to_owned(), "es".to_owned()]);
    }

    #[test]
    fn custom_labels_and_threads() {
        let args = Args::try_parse_from([
            "langid", "a.txt", "b.txt", "test", "--labels", "fr", "it", "--threads", "2", "-q",
        ])
        .unwrap();
        let input = args.evaluation_input();
        assert_eq!(input.labels(), &["fr".to_owned(), "it".to_owned()]);
        assert_eq!(input.threads, 2);
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["langid", "a", "b", "c", "-v", "-q"]).is_err());
    }

    #[test]
    fn missing_positional_is_rejected() {
        assert!(Args::try_parse_from(["langid", "a", "b"]).is_err());
    }
}
