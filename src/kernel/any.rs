//! Runtime-selected kernel
//!
//! Wraps the concrete kernels in one serializable enum so trained models can
//! be persisted together with their kernel parameters and reconstructed
//! without knowing the kernel type at compile time.

use crate::core::FeatureVector;
use crate::kernel::{Kernel, LinearKernel, PolynomialKernel, RbfKernel};
use serde::{Deserialize, Serialize};

/// Kernel chosen at runtime, dispatching to one of the concrete kernels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyKernel {
    Linear(LinearKernel),
    Polynomial(PolynomialKernel),
    Rbf(RbfKernel),
}

impl Kernel for AnyKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        match self {
            AnyKernel::Linear(k) => k.compute(x, y),
            AnyKernel::Polynomial(k) => k.compute(x, y),
            AnyKernel::Rbf(k) => k.compute(x, y),
        }
    }
}

impl From<LinearKernel> for AnyKernel {
    fn from(k: LinearKernel) -> Self {
        AnyKernel::Linear(k)
    }
}

impl From<PolynomialKernel> for AnyKernel {
    fn from(k: PolynomialKernel) -> Self {
        AnyKernel::Polynomial(k)
    }
}

impl From<RbfKernel> for AnyKernel {
    fn from(k: RbfKernel) -> Self {
        AnyKernel::Rbf(k)
    }
}
