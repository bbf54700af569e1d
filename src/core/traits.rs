//! Core traits

use crate::core::{FeatureVector, Prediction};

/// Index-addressable multiclass dataset
///
/// Class labels are small integers; every consumer that cares about the
/// label range checks the contiguity invariant itself (see
/// [`crate::multiclass::split_class_indices`]).
pub trait Dataset: Send + Sync {
    /// Number of examples in the dataset
    fn len(&self) -> usize;

    /// Feature vector of example `i`
    ///
    /// # Panics
    /// Panics if `i >= len()`
    fn example(&self, i: usize) -> &FeatureVector;

    /// Class label of example `i`
    fn class(&self, i: usize) -> usize;

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained binary classifier usable as a one-vs-one component
pub trait PairwiseModel: Send + Sync {
    /// Predict a single input
    fn predict(&self, input: &FeatureVector) -> Prediction;

    /// Number of retained support vectors
    fn n_support_vectors(&self) -> usize;

    /// Decision threshold
    fn threshold(&self) -> f64;
}
