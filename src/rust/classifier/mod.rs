mod error;
mod model;
pub mod builder;
mod classifier;
mod utils;

pub use builder::{ClassifierBuilder, DEFAULT_SEED};
pub use classifier::{classify, Classifier};
pub use error::ClassifierError;
pub use model::LinearClassifier;

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierInfo {
    /// Number of classes the classifier is trained on
    pub num_classes: usize,
    /// Labels of the classes, in index order
    pub class_labels: Vec<String>,
    /// Length of the feature vectors the classifier accepts
    pub input_size: usize,
}
