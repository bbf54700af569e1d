//! One-vs-one composite classifier

use crate::core::{Dataset, FeatureVector, PairwiseModel, Result, Sample, SvmError};
use crate::multiclass::decision::DecisionStrategy;
use crate::multiclass::splitter::{make_pair_samples, split_class_indices};
use log::info;

/// Canonical index of the unordered pair (c0, c1) among all class pairs
///
/// Pairs are laid out row-major over the strict upper triangle:
/// (0,1), (0,2), ..., (0,k-1), (1,2), ..., (k-2,k-1). Valid only for
/// `c0 < c1 < num_classes`.
pub fn pair_index(c0: usize, c1: usize, num_classes: usize) -> usize {
    debug_assert!(c0 < c1 && c1 < num_classes);
    c0 * (2 * num_classes - c0 - 3) / 2 + c1 - 1
}

/// Recover the class count from a triangular pair count
///
/// Inverts `pairs = k * (k - 1) / 2`; exact for any k produced by the
/// forward formula.
pub fn classes_for_pairs(num_pairs: usize) -> usize {
    ((1.0 + (1.0 + 8.0 * num_pairs as f64).sqrt()) / 2.0).round() as usize
}

/// k-class classifier composed of one binary classifier per class pair
///
/// Immutable after construction. The decision strategy is chosen at runtime
/// and drives a `classify(c0, c1) -> ±1` capability backed by the stored
/// models (+1 means c0 wins).
pub struct CompositeClassifier<M: PairwiseModel> {
    pair_models: Vec<M>,
    num_classes: usize,
    strategy: Box<dyn DecisionStrategy>,
}

impl<M: PairwiseModel> CompositeClassifier<M> {
    /// Train one binary model per class pair via the supplied factory
    ///
    /// The factory receives a ±1-labeled pair dataset where the lower class
    /// of the pair is the +1 side.
    ///
    /// # Errors
    /// Propagates splitter errors (empty dataset, non-contiguous labels) and
    /// factory failures; `InvalidDataset` when fewer than two classes exist.
    pub fn train<D, F>(
        dataset: &D,
        mut model_factory: F,
        strategy: Box<dyn DecisionStrategy>,
    ) -> Result<Self>
    where
        D: Dataset + ?Sized,
        F: FnMut(&[Sample]) -> Result<M>,
    {
        let classes = split_class_indices(dataset)?;
        let num_classes = classes.len();
        if num_classes < 2 {
            return Err(SvmError::InvalidDataset(
                "multiclass training needs at least two classes".to_string(),
            ));
        }

        let mut pair_models = Vec::with_capacity(num_classes * (num_classes - 1) / 2);
        for c0 in 0..num_classes - 1 {
            for c1 in c0 + 1..num_classes {
                info!("training pairwise classifier {c0} vs {c1}");
                let pair = make_pair_samples(&classes[c0], &classes[c1], dataset);
                pair_models.push(model_factory(&pair)?);
            }
        }

        Ok(Self {
            pair_models,
            num_classes,
            strategy,
        })
    }

    /// Reassemble a composite from stored pair models (model loading)
    ///
    /// The class count is recovered from the pair count.
    ///
    /// # Errors
    /// `InvalidParameter` when the model count is not triangular.
    pub fn from_pair_models(
        pair_models: Vec<M>,
        strategy: Box<dyn DecisionStrategy>,
    ) -> Result<Self> {
        let num_classes = classes_for_pairs(pair_models.len());
        if num_classes < 2 || num_classes * (num_classes - 1) / 2 != pair_models.len() {
            return Err(SvmError::InvalidParameter(format!(
                "{} pairwise models do not form a class-pair triangle",
                pair_models.len()
            )));
        }
        Ok(Self {
            pair_models,
            num_classes,
            strategy,
        })
    }

    /// Predict the class of an input
    pub fn predict(&self, input: &FeatureVector) -> usize {
        self.strategy.decide(self.num_classes, &mut |c0, c1| {
            let model = &self.pair_models[pair_index(c0, c1, self.num_classes)];
            if model.predict(input).decision_value >= 0.0 {
                1
            } else {
                -1
            }
        })
    }

    /// Number of classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Number of stored pairwise models, always k(k-1)/2
    pub fn num_pairs(&self) -> usize {
        self.pair_models.len()
    }

    /// The pairwise model for classes `c0 < c1`
    pub fn pair_model(&self, c0: usize, c1: usize) -> &M {
        &self.pair_models[pair_index(c0, c1, self.num_classes)]
    }

    /// All stored pairwise models in canonical order
    pub fn pair_models(&self) -> &[M] {
        &self.pair_models
    }

    /// The active decision strategy
    pub fn strategy(&self) -> &dyn DecisionStrategy {
        self.strategy.as_ref()
    }
}
