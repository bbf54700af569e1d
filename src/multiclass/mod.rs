//! One-vs-one multiclass decomposition
//!
//! Splits a k-class dataset into k(k-1)/2 two-class problems, trains a
//! binary classifier per pair, and combines the pairwise outcomes through a
//! pluggable decision strategy.

pub mod composite;
pub mod decision;
pub mod splitter;

pub use self::composite::*;
pub use self::decision::*;
pub use self::splitter::*;
