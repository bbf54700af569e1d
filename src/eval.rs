//! Evaluation helpers for multiclass models

use crate::core::{Dataset, PairwiseModel};
use crate::multiclass::CompositeClassifier;

/// Fraction of dataset examples the model classifies correctly
pub fn accuracy<M, D>(model: &CompositeClassifier<M>, dataset: &D) -> f64
where
    M: PairwiseModel,
    D: Dataset + ?Sized,
{
    if dataset.is_empty() {
        return 0.0;
    }
    let correct = (0..dataset.len())
        .filter(|&i| model.predict(dataset.example(i)) == dataset.class(i))
        .count();
    correct as f64 / dataset.len() as f64
}

/// k×k confusion matrix, rows = actual class, columns = predicted class
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Create an empty matrix for `num_classes` classes
    pub fn new(num_classes: usize) -> Self {
        Self {
            counts: vec![vec![0; num_classes]; num_classes],
        }
    }

    /// Fill a matrix by running the model over a dataset
    ///
    /// # Panics
    /// Panics when a dataset class is outside the model's class range.
    pub fn from_predictions<M, D>(model: &CompositeClassifier<M>, dataset: &D) -> Self
    where
        M: PairwiseModel,
        D: Dataset + ?Sized,
    {
        let mut matrix = Self::new(model.num_classes());
        for i in 0..dataset.len() {
            matrix.record(dataset.class(i), model.predict(dataset.example(i)));
        }
        matrix
    }

    /// Record one (actual, predicted) observation
    pub fn record(&mut self, actual: usize, predicted: usize) {
        self.counts[actual][predicted] += 1;
    }

    /// Observations with the given actual and predicted classes
    pub fn count(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }

    /// Number of classes
    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// Total recorded observations
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Correct predictions divided by total observations
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.num_classes()).map(|c| self.counts[c][c]).sum();
        correct as f64 / total as f64
    }

    /// Recall of one class: correct predictions over actual occurrences
    pub fn recall(&self, class: usize) -> f64 {
        let actual: usize = self.counts[class].iter().sum();
        if actual == 0 {
            return 0.0;
        }
        self.counts[class][class] as f64 / actual as f64
    }
}
