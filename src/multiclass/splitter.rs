//! Dataset splitting for one-vs-one decomposition

use crate::core::{Dataset, Result, Sample, SvmError};
use std::collections::BTreeMap;

/// Group example indices by class label
///
/// Returns one index list per class, ordered by class; within a class the
/// original dataset order is preserved.
///
/// # Errors
/// `EmptyDataset` when there is nothing to split; `NonContiguousLabels` when
/// the label set is not exactly the range [0, k) — e.g. labels {0, 1, 3}.
pub fn split_class_indices<D: Dataset + ?Sized>(dataset: &D) -> Result<Vec<Vec<usize>>> {
    if dataset.is_empty() {
        return Err(SvmError::EmptyDataset);
    }

    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..dataset.len() {
        groups.entry(dataset.class(i)).or_default().push(i);
    }

    // k distinct labels are contiguous from 0 exactly when the largest
    // equals k - 1.
    let num_classes = groups.len();
    let largest = *groups.keys().next_back().expect("groups are non-empty");
    if largest != num_classes - 1 {
        return Err(SvmError::NonContiguousLabels { num_classes });
    }

    Ok(groups.into_values().collect())
}

/// Build a two-class sample set from one class pair
///
/// Examples from `positive_indices` are labeled +1, those from
/// `negative_indices` -1; features are copied out of the dataset.
pub fn make_pair_samples<D: Dataset + ?Sized>(
    positive_indices: &[usize],
    negative_indices: &[usize],
    dataset: &D,
) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(positive_indices.len() + negative_indices.len());
    for &i in positive_indices {
        samples.push(Sample::new(dataset.example(i).clone(), 1.0));
    }
    for &i in negative_indices {
        samples.push(Sample::new(dataset.example(i).clone(), -1.0));
    }
    samples
}
