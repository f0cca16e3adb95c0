use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::builder::ClassifierBuilder;
use super::error::ClassifierError;
use super::utils::{sigmoid, target};
use crate::dataset::{Dataset, LabelMap, Sample};

/// Single-layer linear classifier with a logistic output per class.
///
/// Parameters are a weight matrix of shape `[output_size, input_size]` (one row
/// per class, one column per letter) and a bias per class. The score of class
/// `j` is `sigmoid(W[j] · x - b[j])`.
///
/// The struct owns its parameters; only [`update`](Self::update) changes them.
/// After training it is moved into a [`Classifier`](super::Classifier), which
/// offers no way to mutate it again.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    weights: Array2<f32>,
    biases: Array1<f32>,
}

impl LinearClassifier {
    /// Creates a new ClassifierBuilder for seeded construction
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Creates a classifier from explicit parameters.
    ///
    /// # Errors
    /// `BuildError` if the number of biases differs from the number of weight
    /// rows, or if either dimension is zero.
    pub fn from_parameters(weights: Array2<f32>, biases: Array1<f32>) -> Result<Self, ClassifierError> {
        let (rows, cols) = weights.dim();
        if rows == 0 || cols == 0 {
            return Err(ClassifierError::BuildError(format!(
                "Weight matrix must not be empty, got shape [{}, {}]",
                rows, cols
            )));
        }
        if biases.len() != rows {
            return Err(ClassifierError::BuildError(format!(
                "Expected {} biases to match the weight rows, got {}",
                rows,
                biases.len()
            )));
        }
        Ok(Self { weights, biases })
    }

    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    pub fn biases(&self) -> ArrayView1<'_, f32> {
        self.biases.view()
    }

    /// Activation of a single class.
    ///
    /// Returns `None` when `features` has the wrong length or `class` is not
    /// below `output_size()`.
    pub fn activate(&self, features: &Array1<f32>, class: usize) -> Option<f32> {
        if features.len() != self.input_size() || class >= self.output_size() {
            return None;
        }
        Some(self.activate_unchecked(features, class))
    }

    // callers have checked both dimensions
    fn activate_unchecked(&self, features: &Array1<f32>, class: usize) -> f32 {
        sigmoid(self.weights.row(class).dot(features) - self.biases[class])
    }

    /// Activations of every class, in index order.
    ///
    /// Returns `None` when `features` has the wrong length.
    pub fn activations(&self, features: &Array1<f32>) -> Option<Array1<f32>> {
        if features.len() != self.input_size() {
            return None;
        }
        Some((self.weights.dot(features) - &self.biases).mapv(sigmoid))
    }

    /// Mean squared error over classes, then over samples.
    ///
    /// Samples with an unknown label or a feature vector of the wrong length
    /// are left out of both the sum and the sample count. Returns `None` when
    /// no sample qualifies.
    pub fn cost(&self, dataset: &Dataset, labels: &LabelMap) -> Option<f32> {
        let classes = self.output_size();
        let mut total = 0.0f32;
        let mut samples = 0usize;

        for sample in dataset {
            let Some(truth) = self.truth_index(sample, labels) else {
                continue;
            };
            let squared_error: f32 = (0..classes)
                .map(|j| {
                    let y = self.activate_unchecked(sample.features(), j);
                    (target(j, truth) - y).powi(2)
                })
                .sum();
            total += squared_error / classes as f32;
            samples += 1;
        }

        (samples > 0).then(|| total / samples as f32)
    }

    /// One epoch of online updates, sample by sample in dataset order.
    ///
    /// For each qualifying sample and class `j`, with activation `y`, target
    /// `t` and error `e = t - y`:
    ///
    /// ```text
    /// W[j][i] += learning_rate * e * x[i]
    /// b[j]    -= learning_rate * e
    /// ```
    ///
    /// Returns the number of samples that took part.
    pub fn update(&mut self, learning_rate: f32, dataset: &Dataset, labels: &LabelMap) -> usize {
        let mut seen = 0usize;

        for sample in dataset {
            let Some(truth) = self.truth_index(sample, labels) else {
                continue;
            };
            let features = sample.features();
            for j in 0..self.output_size() {
                let error = target(j, truth) - self.activate_unchecked(features, j);
                self.weights.row_mut(j).scaled_add(learning_rate * error, features);
                self.biases[j] -= learning_rate * error;
            }
            seen += 1;
        }

        seen
    }

    /// Index of the sample's class, or `None` if the sample must be skipped.
    fn truth_index(&self, sample: &Sample, labels: &LabelMap) -> Option<usize> {
        if sample.features().len() != self.input_size() {
            return None;
        }
        labels
            .index_of(sample.label())
            .filter(|&index| index < self.output_size())
    }
}
