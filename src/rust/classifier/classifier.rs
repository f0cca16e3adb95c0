use ndarray::Array1;

use super::error::ClassifierError;
use super::model::LinearClassifier;
use super::utils::argmax;
use crate::dataset::{Dataset, LabelMap};
use crate::features::extract;

/// Labels a feature vector with the class of highest activation.
///
/// Returns `None` if the vector length does not match the model's input size
/// or if the winning index has no label. The winner is the first class whose
/// activation is strictly greater than every earlier one, so ties resolve to
/// the lowest index.
pub fn classify(features: &Array1<f32>, model: &LinearClassifier, labels: &LabelMap) -> Option<String> {
    let activations = model.activations(features)?;
    let best = argmax(activations.view())?;
    labels.label_of(best).map(str::to_owned)
}

/// A trained, frozen classifier: parameters plus the label map they were trained against.
///
/// Nothing here takes `&mut self`, so classification reads no mutable state and
/// the same input always yields the same label.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use lettermix::{Classifier, Dataset, LinearClassifier, Trainer};
/// use std::io::Cursor;
///
/// let (trainset, labels) = Dataset::training_from_reader(Cursor::new(
///     "en,the quick brown fox\nfr,le renard brun\n",
/// ))?;
/// let mut model = LinearClassifier::builder().with_labels(&labels).build()?;
/// Trainer::new(0.91, 500)?.train(&mut model, &trainset, &labels);
///
/// let classifier = Classifier::new(model, labels)?;
/// assert_eq!(classifier.classify_text("the quick brown fox").as_deref(), Some("en"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    model: LinearClassifier,
    labels: LabelMap,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Freezes a trained model together with its label map.
    ///
    /// # Errors
    /// `BuildError` if the label map does not have one label per model output.
    pub fn new(model: LinearClassifier, labels: LabelMap) -> Result<Self, ClassifierError> {
        if labels.len() != model.output_size() {
            return Err(ClassifierError::BuildError(format!(
                "Model has {} outputs but the label map has {} labels",
                model.output_size(),
                labels.len()
            )));
        }
        Ok(Self { model, labels })
    }

    pub fn model(&self) -> &LinearClassifier {
        &self.model
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            num_classes: self.labels.len(),
            class_labels: self.labels.labels().to_vec(),
            input_size: self.model.input_size(),
        }
    }

    /// Labels a feature vector, `None` on a dimension mismatch.
    pub fn classify(&self, features: &Array1<f32>) -> Option<String> {
        classify(features, &self.model, &self.labels)
    }

    /// Extracts letter frequencies from `text` and labels them.
    pub fn classify_text(&self, text: &str) -> Option<String> {
        self.classify(&extract(text))
    }

    /// Activation of every label, in label-index order.
    pub fn scores(&self, features: &Array1<f32>) -> Option<Vec<(String, f32)>> {
        let activations = self.model.activations(features)?;
        Some(
            self.labels
                .labels()
                .iter()
                .cloned()
                .zip(activations.iter().copied())
                .collect(),
        )
    }

    /// Fraction of samples whose predicted label equals their own.
    ///
    /// Every sample counts, including those with labels unknown to the
    /// classifier (always a miss). Returns `None` for an empty dataset.
    pub fn accuracy(&self, dataset: &Dataset) -> Option<f32> {
        if dataset.is_empty() {
            return None;
        }
        let correct = dataset
            .iter()
            .filter(|sample| self.classify(sample.features()).as_deref() == Some(sample.label()))
            .count();
        Some(correct as f32 / dataset.len() as f32)
    }
}
