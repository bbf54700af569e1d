//! Binary SVM classifier
//!
//! Immutable training artifact: the support vectors retained from a solver
//! run, their signed coefficients, the threshold, and the kernel.

use crate::core::{
    FeatureVector, PairwiseModel, Prediction, Result, Sample, SolverConfig, SvmError,
};
use crate::kernel::Kernel;
use crate::solver::SmoSolver;
use log::debug;
use std::sync::Arc;

/// Trained binary classifier
///
/// Holds only the examples with a non-zero dual coefficient; each stores
/// coefficient `alpha * label`, so prediction is a plain weighted kernel sum.
pub struct SvmClassifier<K: Kernel> {
    support_vectors: Vec<FeatureVector>,
    coefficients: Vec<f64>,
    threshold: f64,
    kernel: Arc<K>,
    converged: bool,
}

impl<K: Kernel> SvmClassifier<K> {
    /// Train a binary classifier on ±1-labeled samples
    ///
    /// Runs the SMO solver and compacts the result down to the support
    /// vectors.
    ///
    /// # Errors
    /// `EmptyDataset` for an empty slice, `InvalidParameter` for a
    /// non-positive C, `InvalidLabel` for labels other than ±1.
    pub fn train(samples: &[Sample], kernel: K, config: &SolverConfig) -> Result<Self> {
        if samples.is_empty() {
            return Err(SvmError::EmptyDataset);
        }

        let kernel = Arc::new(kernel);
        let solver = SmoSolver::new(Arc::clone(&kernel), config.clone());
        let outcome = solver.solve(samples)?;

        let mut support_vectors = Vec::new();
        let mut coefficients = Vec::new();
        for (sample, &alpha) in samples.iter().zip(outcome.alphas.iter()) {
            if alpha > 0.0 {
                support_vectors.push(sample.features.clone());
                coefficients.push(alpha * sample.label);
            }
        }
        debug!(
            "retained {} of {} examples as support vectors",
            support_vectors.len(),
            samples.len()
        );

        Ok(Self {
            support_vectors,
            coefficients,
            threshold: outcome.threshold,
            kernel,
            converged: outcome.converged,
        })
    }

    /// Reassemble a classifier from stored parts (model loading)
    pub(crate) fn from_parts(
        support_vectors: Vec<FeatureVector>,
        coefficients: Vec<f64>,
        threshold: f64,
        kernel: Arc<K>,
        converged: bool,
    ) -> Self {
        Self {
            support_vectors,
            coefficients,
            threshold,
            kernel,
            converged,
        }
    }

    /// Raw decision function: threshold + Σ coeffᵢ · K(input, svᵢ)
    pub fn decision_function(&self, input: &FeatureVector) -> f64 {
        let mut sum = self.threshold;
        for (sv, coeff) in self.support_vectors.iter().zip(self.coefficients.iter()) {
            sum += coeff * self.kernel.compute(input, sv);
        }
        sum
    }

    /// Retained support vectors
    pub fn support_vectors(&self) -> &[FeatureVector] {
        &self.support_vectors
    }

    /// Signed coefficients (alpha · label), aligned with the support vectors
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Whether the solver converged before its pass guard fired
    ///
    /// A non-converged classifier is still usable; its margin is just not
    /// KKT-optimal.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// The shared kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

impl<K: Kernel> PairwiseModel for SvmClassifier<K> {
    fn predict(&self, input: &FeatureVector) -> Prediction {
        let decision_value = self.decision_function(input);
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Prediction::new(label, decision_value)
    }

    fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}
