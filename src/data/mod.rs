//! Dataset implementations and loading
//!
//! [`VecDataset`] is the owned, index-addressable multiclass dataset used
//! throughout training; [`csv`] loads one from disk.

pub mod csv;

pub use self::csv::*;

use crate::core::{Dataset, FeatureVector, Result, SvmError};

/// Owned multiclass dataset backed by parallel vectors
#[derive(Debug, Clone, Default)]
pub struct VecDataset {
    examples: Vec<FeatureVector>,
    classes: Vec<usize>,
}

impl VecDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from parallel example and class vectors
    ///
    /// # Errors
    /// `InvalidDataset` when the two vectors differ in length.
    pub fn from_parts(examples: Vec<FeatureVector>, classes: Vec<usize>) -> Result<Self> {
        if examples.len() != classes.len() {
            return Err(SvmError::InvalidDataset(format!(
                "{} examples but {} class labels",
                examples.len(),
                classes.len()
            )));
        }
        Ok(Self { examples, classes })
    }

    /// Append an example with its class label
    pub fn push(&mut self, example: FeatureVector, class: usize) {
        self.examples.push(example);
        self.classes.push(class);
    }

    /// Overwrite the example and class label at position `i`
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn set(&mut self, i: usize, example: FeatureVector, class: usize) {
        self.examples[i] = example;
        self.classes[i] = class;
    }
}

impl Dataset for VecDataset {
    fn len(&self) -> usize {
        self.examples.len()
    }

    fn example(&self, i: usize) -> &FeatureVector {
        &self.examples[i]
    }

    fn class(&self, i: usize) -> usize {
        self.classes[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_access() {
        let mut dataset = VecDataset::new();
        assert!(dataset.is_empty());

        dataset.push(FeatureVector::new(vec![1.0, 2.0]), 0);
        dataset.push(FeatureVector::new(vec![3.0, 4.0]), 1);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.class(1), 1);
        assert_eq!(dataset.example(0), &FeatureVector::new(vec![1.0, 2.0]));
    }

    #[test]
    fn test_set_overwrites() {
        let mut dataset = VecDataset::new();
        dataset.push(FeatureVector::new(vec![0.0]), 0);
        dataset.set(0, FeatureVector::new(vec![5.0]), 2);

        assert_eq!(dataset.example(0), &FeatureVector::new(vec![5.0]));
        assert_eq!(dataset.class(0), 2);
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let result = VecDataset::from_parts(vec![FeatureVector::new(vec![1.0])], vec![0, 1]);
        assert!(matches!(result, Err(SvmError::InvalidDataset(_))));
    }
}
