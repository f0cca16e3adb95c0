//! A language classifier for short titles built on letter frequencies.
//!
//! Text is reduced to a 26-bucket letter-frequency distribution, and a
//! single-layer classifier with one logistic output per language is trained on
//! labelled titles with plain per-sample gradient updates.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use lettermix::{Classifier, Dataset, LinearClassifier, Trainer};
//! use std::io::Cursor;
//!
//! let (trainset, labels) = Dataset::training_from_reader(Cursor::new(
//!     "en,the quick brown fox\nfr,le renard brun\n",
//! ))?;
//! let testset = Dataset::test_from_reader(Cursor::new("en,the lazy dog\n"), &labels)?;
//!
//! let mut model = LinearClassifier::builder()
//!     .with_labels(&labels)
//!     .with_seed(72)
//!     .build()?;
//! let report = Trainer::new(0.91, 1000)?.train(&mut model, &trainset, &labels);
//! println!("Cost = {:?}", report.final_cost);
//!
//! let classifier = Classifier::new(model, labels)?;
//! assert_eq!(classifier.classify_text("the lazy dog").as_deref(), Some("en"));
//! assert_eq!(classifier.accuracy(&testset), Some(1.0));
//! # Ok(())
//! # }
//! ```
//!
//! Training owns the parameters mutably; [`Classifier::new`] then freezes them,
//! so the trained classifier can be shared freely, across threads included.

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod features;
pub mod prompt;
pub mod trainer;

pub use classifier::{
    classify, Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, LinearClassifier, DEFAULT_SEED,
};
pub use config::TrainingConfig;
pub use dataset::{read_records, Dataset, LabelMap, Record, Sample};
pub use features::{extract, INPUT_SIZE};
pub use trainer::{Trainer, TrainingReport, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE};

/// Initializes `env_logger`, reading `RUST_LOG` and falling back to `info`.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
