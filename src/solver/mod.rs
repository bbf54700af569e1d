//! SVM solver implementation
//!
//! Implements the classic Sequential Minimal Optimization (SMO) algorithm
//! for the two-variable working set, following Platt's "Sequential Minimal
//! Optimization: A Fast Algorithm for Training Support Vector Machines".

pub mod smo;

pub use self::smo::*;
