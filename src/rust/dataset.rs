//! Training and test data: record reading, samples and the label map.
//!
//! Records are line oriented. The first comma-delimited field of a line is the
//! label, the rest of the line is free text that goes through
//! [`extract`](crate::features::extract).

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use ndarray::Array1;

use crate::classifier::ClassifierError;
use crate::features::extract;

/// A raw `(label, text)` pair as read from a record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub label: String,
    pub text: String,
}

/// Reads every record of a line-oriented source.
///
/// Lines end at `\n`, a preceding `\r` is stripped and a last line without a
/// terminator is still returned. Blank lines are skipped. Lines without a comma
/// or with an empty label are malformed and skipped with a warning.
///
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`, which
/// [`extract`](crate::features::extract) ignores like any other non-ASCII
/// character. A Latin-1 file therefore loads with its accented letters dropped.
pub fn read_records<R: BufRead>(reader: R) -> io::Result<Vec<Record>> {
    let mut records = Vec::new();
    for (line_no, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        let line = String::from_utf8_lossy(line);
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once(',') {
            Some((label, text)) if !label.is_empty() => records.push(Record {
                label: label.to_string(),
                text: text.to_string(),
            }),
            _ => warn!("Skipping malformed record on line {}: {:?}", line_no + 1, line),
        }
    }
    Ok(records)
}

/// A labelled feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    label: String,
    features: Array1<f32>,
}

impl Sample {
    /// Creates a sample from an already computed feature vector.
    ///
    /// The length is not checked here; consumers skip samples whose length
    /// does not match the classifier's input size.
    pub fn new(label: impl Into<String>, features: Array1<f32>) -> Self {
        Self {
            label: label.into(),
            features,
        }
    }

    /// Creates a sample by extracting letter frequencies from `text`.
    pub fn from_text(label: impl Into<String>, text: &str) -> Self {
        Self::new(label, extract(text))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn features(&self) -> &Array1<f32> {
        &self.features
    }
}

/// Bijection between labels and dense class indices, in first-seen order.
///
/// Only the training loader adds labels. Once it returns, the map is handed
/// out by value or shared reference and cannot grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    indices: HashMap<String, usize>,
    labels: Vec<String>,
}

impl LabelMap {
    /// Builds a map from labels in order, ignoring repeats.
    ///
    /// # Example
    /// ```
    /// use lettermix::LabelMap;
    ///
    /// let labels = LabelMap::from_labels(["en", "fr", "en", "de"]);
    /// assert_eq!(labels.index_of("de"), Some(2));
    /// assert_eq!(labels.label_of(1), Some("fr"));
    /// ```
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for label in labels {
            map.intern(label.as_ref());
        }
        map
    }

    /// Returns the index of `label`, assigning the next free one if unseen.
    pub(crate) fn intern(&mut self, label: &str) -> usize {
        if let Some(&index) = self.indices.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.indices.insert(label.to_string(), index);
        self.labels.push(label.to_string());
        index
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    /// Labels ordered by index.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Ordered collection of samples. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Builds a training set and its label map from a record source.
    ///
    /// Labels are indexed in the order they first appear.
    pub fn training_from_reader<R: BufRead>(reader: R) -> Result<(Self, LabelMap), ClassifierError> {
        let records = read_records(reader)
            .map_err(|e| ClassifierError::ParseError(format!("Failed to read training records: {}", e)))?;
        Ok(Self::training_from_records(records))
    }

    /// Builds a test set against a frozen label map.
    ///
    /// Samples with unknown labels are kept; cost and update skip them and
    /// they count as misses when measuring accuracy.
    pub fn test_from_reader<R: BufRead>(reader: R, labels: &LabelMap) -> Result<Self, ClassifierError> {
        let records = read_records(reader)
            .map_err(|e| ClassifierError::ParseError(format!("Failed to read test records: {}", e)))?;
        Ok(Self::test_from_records(records, labels))
    }

    /// Loads a training set from a file.
    pub fn load_training(path: impl AsRef<Path>) -> Result<(Self, LabelMap), ClassifierError> {
        let path = path.as_ref();
        let records = records_from_file(path)?;
        let (dataset, labels) = Self::training_from_records(records);
        info!(
            "Loaded {} training samples with {} labels from {:?}",
            dataset.len(),
            labels.len(),
            path
        );
        Ok((dataset, labels))
    }

    /// Loads a test set from a file, using the label map of the training set.
    pub fn load_test(path: impl AsRef<Path>, labels: &LabelMap) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let records = records_from_file(path)?;
        let dataset = Self::test_from_records(records, labels);
        info!("Loaded {} test samples from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    fn training_from_records(records: Vec<Record>) -> (Self, LabelMap) {
        let mut labels = LabelMap::default();
        let samples = records
            .into_iter()
            .map(|record| {
                labels.intern(&record.label);
                Sample::from_text(record.label, &record.text)
            })
            .collect();
        (Self { samples }, labels)
    }

    fn test_from_records(records: Vec<Record>, labels: &LabelMap) -> Self {
        let dataset: Self = records
            .into_iter()
            .map(|record| Sample::from_text(record.label, &record.text))
            .collect();

        let unknown = dataset.iter().filter(|s| !labels.contains(s.label())).count();
        if unknown > 0 {
            debug!("{} test samples carry labels unseen during training", unknown);
        }
        dataset
    }
}

fn records_from_file(path: &Path) -> Result<Vec<Record>, ClassifierError> {
    let data_error = |source| ClassifierError::DataError {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(data_error)?;
    read_records(BufReader::new(file)).map_err(data_error)
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_records() -> Result<(), Box<dyn std::error::Error>> {
        let input = "en,the quick brown fox\r\nfr,le renard, brun\n\nde,der Hund";
        let records = read_records(Cursor::new(input))?;
        assert_eq!(
            records,
            vec![
                Record { label: "en".into(), text: "the quick brown fox".into() },
                Record { label: "fr".into(), text: "le renard, brun".into() },
                Record { label: "de".into(), text: "der Hund".into() },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_latin1_bytes_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let input: &[u8] = b"fr,caf\xe9 noir\nen,black coffee\n";
        let records = read_records(Cursor::new(input))?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "fr");
        assert_eq!(records[1].label, "en");
        assert_eq!(extract(&records[0].text), extract("caf noir"));

        let (dataset, labels) = Dataset::training_from_reader(Cursor::new(input))?;
        assert_eq!(dataset.len(), 2);
        assert_eq!(labels.labels(), ["fr", "en"]);
        let features = dataset.samples()[0].features();
        for letter in [b'c', b'a', b'f'] {
            assert!(features[usize::from(letter - b'a')] > 0.0, "no bucket for {}", letter as char);
        }
        assert_eq!(features[usize::from(b'e' - b'a')], 0.0);
        Ok(())
    }

    #[test]
    fn test_malformed_records_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let input = "no comma here\n,missing label\nen,ok\n";
        let records = read_records(Cursor::new(input))?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "en");
        Ok(())
    }

    #[test]
    fn test_empty_text_is_kept() -> Result<(), Box<dyn std::error::Error>> {
        let records = read_records(Cursor::new("en,\n"))?;
        assert_eq!(records, vec![Record { label: "en".into(), text: String::new() }]);
        Ok(())
    }

    #[test]
    fn test_label_map_first_seen_order() -> Result<(), Box<dyn std::error::Error>> {
        let input = "en,one\nfr,deux\nen,three\nde,vier\n";
        let (dataset, labels) = Dataset::training_from_reader(Cursor::new(input))?;
        assert_eq!(dataset.len(), 4);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.index_of("en"), Some(0));
        assert_eq!(labels.index_of("fr"), Some(1));
        assert_eq!(labels.index_of("de"), Some(2));
        assert_eq!(labels.labels(), ["en", "fr", "de"]);
        Ok(())
    }

    #[test]
    fn test_insertion_order_preserved() -> Result<(), Box<dyn std::error::Error>> {
        let input = "b,x\na,y\nc,z\n";
        let (dataset, _) = Dataset::training_from_reader(Cursor::new(input))?;
        let order: Vec<&str> = dataset.iter().map(Sample::label).collect();
        assert_eq!(order, ["b", "a", "c"]);
        Ok(())
    }

    #[test]
    fn test_test_set_never_extends_labels() -> Result<(), Box<dyn std::error::Error>> {
        let labels = LabelMap::from_labels(["en", "fr"]);
        let before = labels.clone();
        let dataset = Dataset::test_from_reader(Cursor::new("en,hello\nit,ciao\n"), &labels)?;
        assert_eq!(dataset.len(), 2);
        assert_eq!(labels, before);
        assert!(!labels.contains("it"));
        Ok(())
    }

    #[test]
    fn test_sample_features() {
        let sample = Sample::from_text("en", "AB");
        assert_eq!(sample.label(), "en");
        assert_eq!(sample.features()[0], 0.5);
        assert_eq!(sample.features()[1], 0.5);
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let result = Dataset::load_training("/nonexistent/lettermix/lang.train.csv");
        match result {
            Err(e) => assert!(e.is_data_error()),
            Ok(_) => panic!("expected a data error"),
        }
    }
}
