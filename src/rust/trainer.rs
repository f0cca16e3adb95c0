use log::{debug, info, log_enabled, warn, Level};

use crate::classifier::{ClassifierError, LinearClassifier};
use crate::dataset::{Dataset, LabelMap};

/// Learning rate used when none is configured.
///
/// Chosen by hand. Lowest cost reached while trying rates on the language
/// title set with seed 72:
///
/// ```text
///  rate     min cost
///  0.05     0.8867
///  0.06     0.3034
///  0.07     0.1655
///  0.09     0.1043
///  0.27     0.0708
///  0.32     0.0546
///  0.33     0.0303
///  0.53     0.0226
///  0.57     0.0108
///  0.79     0.0099
///  0.91     0.0052
///  1.72     0.0050
///  2.22     0.0025
///  3.55     0.0013
///  6.11     1.07e-6
/// 10.08     7.90e-7
/// ```
pub const DEFAULT_LEARNING_RATE: f32 = 0.91;

/// Number of epochs used when none is configured.
pub const DEFAULT_EPOCHS: usize = 4000;

/// Outcome of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    /// Number of epochs run
    pub epochs: usize,
    /// Cost before the first epoch, `None` if no sample qualified
    pub initial_cost: Option<f32>,
    /// Cost after the last epoch, `None` if no sample qualified
    pub final_cost: Option<f32>,
}

impl TrainingReport {
    /// True if training brought the cost strictly down.
    pub fn improved(&self) -> bool {
        matches!((self.initial_cost, self.final_cost), (Some(initial), Some(last)) if last < initial)
    }
}

/// Runs a fixed number of update epochs at a fixed learning rate.
///
/// There is no convergence check, early stopping or schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Trainer {
    learning_rate: f32,
    epochs: usize,
    progress_interval: usize,
}

impl Default for Trainer {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
            progress_interval: 0,
        }
    }
}

impl Trainer {
    /// Creates a trainer.
    ///
    /// # Errors
    /// `ValidationError` if the learning rate is not a finite positive number.
    pub fn new(learning_rate: f32, epochs: usize) -> Result<Self, ClassifierError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(ClassifierError::ValidationError(format!(
                "Learning rate must be a finite positive number, got {}",
                learning_rate
            )));
        }
        Ok(Self {
            learning_rate,
            epochs,
            progress_interval: 0,
        })
    }

    /// Logs the cost at debug level every `interval` epochs. Zero disables it.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Trains `model` on `dataset` and reports the cost before and after.
    pub fn train(&self, model: &mut LinearClassifier, dataset: &Dataset, labels: &LabelMap) -> TrainingReport {
        if labels.len() != model.output_size() {
            warn!(
                "Label map has {} labels but the model has {} outputs",
                labels.len(),
                model.output_size()
            );
        }

        let initial_cost = model.cost(dataset, labels);
        info!(
            "Training for {} epochs at learning rate {} (initial cost {:?})",
            self.epochs, self.learning_rate, initial_cost
        );

        if initial_cost.is_none() {
            warn!("No training sample has a known label and a valid feature vector");
        }

        for epoch in 1..=self.epochs {
            model.update(self.learning_rate, dataset, labels);
            if self.progress_interval > 0 && epoch % self.progress_interval == 0 && log_enabled!(Level::Debug) {
                debug!("Epoch {}/{}: cost {:?}", epoch, self.epochs, model.cost(dataset, labels));
            }
        }

        let final_cost = model.cost(dataset, labels);
        info!("Training finished (final cost {:?})", final_cost);
        debug!("Weights:\n{}", model.weights());
        debug!("Biases: {}", model.biases());

        TrainingReport {
            epochs: self.epochs,
            initial_cost,
            final_cost,
        }
    }
}
