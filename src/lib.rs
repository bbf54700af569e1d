//! One-vs-one multiclass Support Vector Machine training
//!
//! The binary trainer implements Platt's Sequential Minimal Optimization
//! (SMO); the multiclass layer decomposes a k-class problem into k(k-1)/2
//! pairwise problems and combines the trained classifiers through a
//! pluggable decision strategy (tournament elimination or max-wins voting).

pub mod cache;
pub mod classifier;
pub mod core;
pub mod data;
pub mod eval;
pub mod kernel;
pub mod multiclass;
pub mod persistence;
pub mod solver;

// Re-export main types for convenience
pub use crate::cache::{CacheStats, ErrorCache, KernelCache};
pub use crate::classifier::SvmClassifier;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{Result, SvmError};
pub use crate::data::{load_csv, load_csv_from_reader, VecDataset};
pub use crate::kernel::{AnyKernel, Kernel, LinearKernel, PolynomialKernel, RbfKernel};
pub use crate::multiclass::{
    classes_for_pairs, strategy_by_name, CompositeClassifier, DecisionStrategy, MaxWins,
    Tournament,
};
pub use crate::solver::SmoSolver;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
