use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, log_enabled, Level};

use lettermix::{prompt, Classifier, ClassifierError, Dataset, LinearClassifier, TrainingConfig};

/// Exit code for a missing or unreadable training or test file.
const EXIT_DATA_ERROR: u8 = 2;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with training options (seed, epochs, learningRate, trainPath, testPath)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for parameter initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Number of training epochs
    #[arg(short, long)]
    epochs: Option<usize>,

    /// Learning rate of the update step
    #[arg(short = 'r', long)]
    learning_rate: Option<f32>,

    /// Training records (label,text per line)
    #[arg(long)]
    train: Option<PathBuf>,

    /// Test records (label,text per line)
    #[arg(long)]
    test: Option<PathBuf>,

    /// Skip the interactive prompt after evaluation
    #[arg(long)]
    no_prompt: bool,
}

impl Args {
    /// Defaults, then the config file, then command line flags.
    fn resolve_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(train) = &self.train {
            config.train_path = train.clone();
        }
        if let Some(test) = &self.test {
            config.test_path = test.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    lettermix::init_logger();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(failure_code(&e))
        }
    }
}

/// Exit code for a failed run: `EXIT_DATA_ERROR` when a data file could not
/// be read, 1 for anything else.
fn failure_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ClassifierError>() {
        Some(e) if e.is_data_error() => EXIT_DATA_ERROR,
        _ => 1,
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;
    if log_enabled!(Level::Debug) {
        debug!("Configuration: {}", config.to_json_string()?);
    }
    info!("=== Loading data ===");

    let (trainset, labels) = Dataset::load_training(&config.train_path).context("Cannot load the training set")?;
    let testset = Dataset::load_test(&config.test_path, &labels).context("Cannot load the test set")?;

    let mut model = LinearClassifier::builder()
        .with_labels(&labels)
        .with_seed(config.seed)
        .build()?;
    let trainer = config.trainer()?.with_progress_interval(config.epochs / 10);

    info!("=== Training ===");
    let start_time = Instant::now();
    let report = trainer.train(&mut model, &trainset, &labels);
    info!("Training took {:.2?}", start_time.elapsed());
    println!("Cost = {}", display_metric(report.final_cost));

    let classifier = Classifier::new(model, labels)?;
    println!("Accuracy = {}", display_metric(classifier.accuracy(&testset)));

    if !args.no_prompt {
        let stdin = io::stdin();
        let classified = prompt::run(&classifier, stdin.lock(), io::stdout().lock())?;
        info!("Classified {} titles interactively", classified);
    }

    Ok(())
}

fn display_metric(value: Option<f32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    fn missing_file_error() -> ClassifierError {
        ClassifierError::DataError {
            path: PathBuf::from("lang.train.csv"),
            source: io::Error::new(ErrorKind::NotFound, "No such file or directory"),
        }
    }

    #[test]
    fn test_data_error_exit_code() {
        let err = anyhow::Error::new(missing_file_error());
        assert_eq!(failure_code(&err), EXIT_DATA_ERROR);

        let err = anyhow::Error::new(missing_file_error()).context("Cannot load the training set");
        assert_eq!(failure_code(&err), EXIT_DATA_ERROR);
    }

    #[test]
    fn test_other_errors_exit_code() {
        let err = anyhow::Error::new(ClassifierError::ConfigError("bad".into()));
        assert_eq!(failure_code(&err), 1);

        let err = anyhow::Error::new(ClassifierError::ParseError("bad".into())).context("Cannot load the test set");
        assert_eq!(failure_code(&err), 1);

        assert_eq!(failure_code(&anyhow::anyhow!("prompt closed")), 1);
    }
}
