//! Kernel trait definition

use crate::core::FeatureVector;

/// Pairwise similarity function K(x, y)
///
/// Implementations must be symmetric (K(x, y) == K(y, x)) and should satisfy
/// Mercer's condition to be valid for SVM training; positive
/// semi-definiteness is not checked. Kernels are stateless and safe to call
/// concurrently.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64;
}
