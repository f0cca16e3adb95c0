use log::{debug, info};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::ClassifierError;
use super::model::LinearClassifier;
use crate::dataset::LabelMap;
use crate::features::INPUT_SIZE;

/// Seed used for parameter initialization when none is given.
pub const DEFAULT_SEED: u64 = 72;

/// A builder for constructing a randomly initialized [`LinearClassifier`].
///
/// Every weight and bias is drawn uniformly from `[0, 1)` by a `StdRng` seeded
/// with the configured seed, weights row by row first, then the biases. The
/// same seed and shape always give the same parameters.
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    input_size: usize,
    output_size: Option<usize>,
    seed: u64,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierBuilder {
    /// Creates a builder with the letter-frequency input size and the default seed
    ///
    /// # Example
    /// ```
    /// use lettermix::ClassifierBuilder;
    ///
    /// let model = ClassifierBuilder::new()
    ///     .with_output_size(3)
    ///     .with_seed(7)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(model.output_size(), 3);
    /// assert_eq!(model.input_size(), 26);
    /// ```
    pub fn new() -> Self {
        Self {
            input_size: INPUT_SIZE,
            output_size: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the number of input features. Defaults to [`INPUT_SIZE`].
    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Sets the number of classes.
    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = Some(output_size);
        self
    }

    /// Sets the number of classes to the size of a label map.
    pub fn with_labels(self, labels: &LabelMap) -> Self {
        self.with_output_size(labels.len())
    }

    /// Sets the seed of the random number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the requested shape:
    /// - The output size must be set and non-zero
    /// - The input size must be non-zero
    fn validate(&self) -> Result<usize, ClassifierError> {
        let output_size = self.output_size.ok_or_else(|| {
            ClassifierError::BuildError("Output size must be set before building".to_string())
        })?;
        if output_size == 0 {
            return Err(ClassifierError::ValidationError(
                "At least one class is required".into(),
            ));
        }
        if self.input_size == 0 {
            return Err(ClassifierError::ValidationError(
                "Input size cannot be zero".into(),
            ));
        }
        Ok(output_size)
    }

    /// Builds the classifier with freshly initialized parameters.
    ///
    /// # Returns
    /// * `Result<LinearClassifier, ClassifierError>` - The classifier, or an error if:
    ///   - No output size was set
    ///   - The output or input size is zero
    pub fn build(self) -> Result<LinearClassifier, ClassifierError> {
        let output_size = self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let weights = Array2::from_shape_fn((output_size, self.input_size), |_| rng.random::<f32>());
        let biases = Array1::from_shape_fn(output_size, |_| rng.random::<f32>());

        info!(
            "Initialized {} x {} parameters with seed {}",
            output_size, self.input_size, self.seed
        );
        debug!("Initial biases: {}", biases);

        LinearClassifier::from_parameters(weights, biases)
    }
}
