//! Radial basis function kernel implementation
//!
//! K(x, y) = exp(-‖x - y‖² / (2σ²)) where σ² is the bandwidth parameter.
//! Narrow bandwidths make each training example influential only in a small
//! neighborhood; wide bandwidths approach a constant kernel.

use crate::core::{FeatureVector, Result, SvmError};
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// RBF kernel with bandwidth σ²: K(x, y) = exp(-‖x - y‖² / (2σ²))
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RbfKernel {
    sigma2: f64,
}

impl RbfKernel {
    /// Create an RBF kernel with the given bandwidth σ²
    ///
    /// # Errors
    /// Returns `InvalidParameter` when `sigma2` is not strictly positive
    /// and finite.
    pub fn new(sigma2: f64) -> Result<Self> {
        if !(sigma2 > 0.0 && sigma2.is_finite()) {
            return Err(SvmError::InvalidParameter(format!(
                "RBF bandwidth must be positive and finite, got {sigma2}"
            )));
        }
        Ok(Self { sigma2 })
    }

    /// Get the bandwidth parameter σ²
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }
}

impl Kernel for RbfKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        (-x.squared_distance(y) / (2.0 * self.sigma2)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_bandwidth_rejected() {
        assert!(RbfKernel::new(0.0).is_err());
        assert!(RbfKernel::new(-1.0).is_err());
        assert!(RbfKernel::new(f64::NAN).is_err());
        assert!(RbfKernel::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_identical_points() {
        let kernel = RbfKernel::new(1.0).expect("valid bandwidth");

        let x = FeatureVector::new(vec![1.0, 2.0, 3.0]);

        assert_relative_eq!(kernel.compute(&x, &x), 1.0);
    }

    #[test]
    fn test_known_value() {
        let kernel = RbfKernel::new(0.5).expect("valid bandwidth");

        let x = FeatureVector::new(vec![0.0]);
        let y = FeatureVector::new(vec![1.0]);

        // exp(-1 / (2 * 0.5)) = exp(-1)
        assert_relative_eq!(kernel.compute(&x, &y), (-1.0f64).exp());
    }

    #[test]
    fn test_symmetry() {
        let kernel = RbfKernel::new(2.0).expect("valid bandwidth");

        let x = FeatureVector::new(vec![1.0, -1.0]);
        let y = FeatureVector::new(vec![0.0, 3.0]);

        assert_eq!(kernel.compute(&x, &y), kernel.compute(&y, &x));
    }

    #[test]
    fn test_decreases_with_distance() {
        let kernel = RbfKernel::new(1.0).expect("valid bandwidth");

        let origin = FeatureVector::new(vec![0.0, 0.0]);
        let near = FeatureVector::new(vec![0.5, 0.0]);
        let far = FeatureVector::new(vec![3.0, 0.0]);

        let k_near = kernel.compute(&origin, &near);
        let k_far = kernel.compute(&origin, &far);
        assert!(k_near > k_far);
        assert!(k_far > 0.0);
    }
}
