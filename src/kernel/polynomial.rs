//! Polynomial kernel implementation
//!
//! K(x, y) = (1 + x · y)^d for a fixed integer degree d. The constant term
//! makes degree 1 behave like a linear kernel with an implicit bias feature.

use crate::core::{FeatureVector, Result, SvmError};
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// Polynomial kernel of fixed integer degree: K(x, y) = (1 + x · y)^d
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolynomialKernel {
    degree: u32,
}

impl PolynomialKernel {
    /// Create a polynomial kernel of the given degree
    ///
    /// # Errors
    /// Returns `InvalidParameter` when `degree` is zero (a constant kernel
    /// cannot separate anything).
    pub fn new(degree: u32) -> Result<Self> {
        if degree == 0 {
            return Err(SvmError::InvalidParameter(
                "polynomial degree must be at least 1".to_string(),
            ));
        }
        Ok(Self { degree })
    }

    /// Get the polynomial degree
    pub fn degree(&self) -> u32 {
        self.degree
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        let base = 1.0 + x.dot(y);
        // powi uses exponentiation by squaring
        base.powi(self.degree as i32)
    }
}
