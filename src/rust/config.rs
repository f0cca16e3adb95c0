use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifierError, DEFAULT_SEED};
use crate::trainer::{Trainer, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE};

/// Startup options for a training run.
///
/// Keys are camelCase in JSON (`seed`, `epochs`, `learningRate`, `trainPath`,
/// `testPath`); missing keys take their default, unknown keys are rejected.
///
/// ```
/// use lettermix::TrainingConfig;
///
/// let config = TrainingConfig::from_json_str(r#"{ "epochs": 100, "learningRate": 0.5 }"#).unwrap();
/// assert_eq!(config.epochs, 100);
/// assert_eq!(config.seed, 72);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TrainingConfig {
    /// Seed for parameter initialization
    pub seed: u64,
    /// Number of update passes over the training set
    pub epochs: usize,
    /// Step size of each update
    pub learning_rate: f32,
    /// Training records, one `label,text` per line
    pub train_path: PathBuf,
    /// Test records, same format as the training records
    pub test_path: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            epochs: DEFAULT_EPOCHS,
            learning_rate: DEFAULT_LEARNING_RATE,
            train_path: PathBuf::from("lang.train.csv"),
            test_path: PathBuf::from("lang.test.csv"),
        }
    }
}

impl TrainingConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ClassifierError> {
        serde_json::from_str(json).map_err(|e| ClassifierError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ClassifierError::ConfigError(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration back to JSON, with the same keys it is read from.
    pub fn to_json_string(&self) -> Result<String, ClassifierError> {
        serde_json::to_string(self).map_err(|e| ClassifierError::ConfigError(format!("Cannot serialize configuration: {}", e)))
    }

    /// Validates the configuration:
    /// - The learning rate must be finite and positive
    /// - Neither data path may be empty
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifierError::ConfigError(format!(
                "learningRate must be a finite positive number, got {}",
                self.learning_rate
            )));
        }
        if self.train_path.as_os_str().is_empty() {
            return Err(ClassifierError::ConfigError("trainPath cannot be empty".into()));
        }
        if self.test_path.as_os_str().is_empty() {
            return Err(ClassifierError::ConfigError("testPath cannot be empty".into()));
        }
        Ok(())
    }

    /// Creates the trainer described by this configuration.
    pub fn trainer(&self) -> Result<Trainer, ClassifierError> {
        self.validate()?;
        Trainer::new(self.learning_rate, self.epochs)
    }
}
