//! Linear kernel implementation

use crate::core::FeatureVector;
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// Linear kernel: K(x, y) = x · y
///
/// The simplest kernel function, equivalent to training in the original
/// feature space.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinearKernel;

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self
    }
}

impl Kernel for LinearKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        x.dot(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_kernel_basic() {
        let kernel = LinearKernel::new();

        let x = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        let y = FeatureVector::new(vec![0.0, 2.0, 1.0]);

        assert_eq!(kernel.compute(&x, &y), 7.0);
    }

    #[test]
    fn test_linear_kernel_identical() {
        let kernel = LinearKernel::new();

        let x = FeatureVector::new(vec![1.0, 2.0, 3.0]);

        // x · x = 1 + 4 + 9 = 14
        assert_eq!(kernel.compute(&x, &x), 14.0);
    }

    #[test]
    fn test_linear_kernel_orthogonal() {
        let kernel = LinearKernel::new();

        let x = FeatureVector::new(vec![1.0, 0.0]);
        let y = FeatureVector::new(vec![0.0, 1.0]);

        assert_eq!(kernel.compute(&x, &y), 0.0);
    }
}
