//! Core type definitions

use serde::{Deserialize, Serialize};

/// Dense feature vector
///
/// Examples are opaque to the solver; everything it needs goes through a
/// kernel function, which in turn only needs the dot product and squared
/// distance defined here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature values, one per dimension
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Create a feature vector from raw values
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of dimensions
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Check if the vector has no dimensions
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dot product with another vector of the same dimensionality
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Squared Euclidean distance to another vector: Σᵢ (xᵢ - yᵢ)²
    pub fn squared_distance(&self, other: &FeatureVector) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Training sample for a binary problem
#[derive(Clone, Debug)]
pub struct Sample {
    /// Feature vector
    pub features: FeatureVector,
    /// Class label, -1.0 or +1.0
    pub label: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: FeatureVector, label: f64) -> Self {
        Self { features, label }
    }
}

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Confidence as the absolute value of the decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Configuration for the SMO solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Soft-margin regularization parameter (upper bound for every alpha)
    pub c: f64,
    /// KKT violation tolerance
    pub tolerance: f64,
    /// Upper bound on outer-loop sweeps; exceeding it reports
    /// non-convergence instead of looping forever
    pub max_passes: usize,
    /// Kernel cache size in bytes
    pub cache_size: usize,
    /// Seed for the fallback-scan offset; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 0.001,
            max_passes: 10_000,
            cache_size: 100_000_000, // 100MB
            seed: None,
        }
    }
}

/// Result of one solver run
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Dual coefficients, one per training example, each within [0, C]
    pub alphas: Vec<f64>,
    /// Decision threshold, finalized from the per-class margin bounds
    pub threshold: f64,
    /// False when the pass guard fired before the KKT sweep went quiet
    pub converged: bool,
    /// Number of outer-loop sweeps performed
    pub passes: usize,
}
