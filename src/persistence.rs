//! Model serialization and persistence
//!
//! JSON save/load for binary and composite classifiers. Kernel parameters
//! are stored as typed values (see [`crate::kernel::AnyKernel`]), so a
//! loaded model is immediately usable.

use crate::classifier::SvmClassifier;
use crate::core::{FeatureVector, PairwiseModel, Result, SvmError};
use crate::kernel::AnyKernel;
use crate::multiclass::{strategy_by_name, CompositeClassifier};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

/// Serializable payload of one binary classifier
#[derive(Serialize, Deserialize, Clone)]
pub struct BinaryModelData {
    /// Retained support vectors
    pub support_vectors: Vec<FeatureVector>,
    /// Signed coefficients (alpha · label), aligned with the support vectors
    pub coefficients: Vec<f64>,
    /// Decision threshold
    pub threshold: f64,
    /// Kernel with its parameters
    pub kernel: AnyKernel,
    /// Solver convergence flag carried through from training
    pub converged: bool,
}

impl BinaryModelData {
    /// Capture a trained classifier
    pub fn from_classifier(model: &SvmClassifier<AnyKernel>) -> Self {
        Self {
            support_vectors: model.support_vectors().to_vec(),
            coefficients: model.coefficients().to_vec(),
            threshold: model.threshold(),
            kernel: *model.kernel(),
            converged: model.converged(),
        }
    }

    /// Rebuild the classifier
    pub fn into_classifier(self) -> SvmClassifier<AnyKernel> {
        SvmClassifier::from_parts(
            self.support_vectors,
            self.coefficients,
            self.threshold,
            Arc::new(self.kernel),
            self.converged,
        )
    }
}

/// Model file metadata
#[derive(Serialize, Deserialize, Clone)]
pub struct ModelMetadata {
    /// Library version that produced the file
    pub library_version: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// Total support vectors across all stored models
    pub n_support_vectors: usize,
    /// Class count; 2 for a standalone binary model
    pub num_classes: usize,
}

impl ModelMetadata {
    fn stamped(n_support_vectors: usize, num_classes: usize) -> Self {
        Self {
            library_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            n_support_vectors,
            num_classes,
        }
    }
}

/// On-disk representation of a binary classifier
#[derive(Serialize, Deserialize)]
pub struct SerializableBinaryModel {
    pub model: BinaryModelData,
    pub metadata: ModelMetadata,
}

impl SerializableBinaryModel {
    /// Capture a trained binary classifier with fresh metadata
    pub fn from_classifier(model: &SvmClassifier<AnyKernel>) -> Self {
        let data = BinaryModelData::from_classifier(model);
        let metadata = ModelMetadata::stamped(data.support_vectors.len(), 2);
        Self {
            model: data,
            metadata,
        }
    }

    /// Rebuild the classifier
    pub fn into_classifier(self) -> SvmClassifier<AnyKernel> {
        self.model.into_classifier()
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(path, self)
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }
}

/// On-disk representation of a composite classifier
#[derive(Serialize, Deserialize)]
pub struct SerializableCompositeModel {
    /// Decision strategy identifier
    pub strategy: String,
    /// Pairwise models in canonical pair order
    pub pair_models: Vec<BinaryModelData>,
    pub metadata: ModelMetadata,
}

impl SerializableCompositeModel {
    /// Capture a trained composite classifier with fresh metadata
    pub fn from_classifier(model: &CompositeClassifier<SvmClassifier<AnyKernel>>) -> Self {
        let pair_models: Vec<BinaryModelData> = model
            .pair_models()
            .iter()
            .map(BinaryModelData::from_classifier)
            .collect();
        let total_svs = pair_models.iter().map(|m| m.support_vectors.len()).sum();
        let metadata = ModelMetadata::stamped(total_svs, model.num_classes());
        Self {
            strategy: model.strategy().name().to_string(),
            pair_models,
            metadata,
        }
    }

    /// Rebuild the composite classifier, strategy included
    ///
    /// # Errors
    /// `SerializationError` for an unknown strategy name,
    /// `InvalidParameter` when the stored pair count is not triangular.
    pub fn into_classifier(self) -> Result<CompositeClassifier<SvmClassifier<AnyKernel>>> {
        let strategy = strategy_by_name(&self.strategy).ok_or_else(|| {
            SvmError::SerializationError(format!("unknown decision strategy '{}'", self.strategy))
        })?;
        let models: Vec<SvmClassifier<AnyKernel>> = self
            .pair_models
            .into_iter()
            .map(BinaryModelData::into_classifier)
            .collect();
        CompositeClassifier::from_pair_models(models, strategy)
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(path, self)
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }
}

fn save_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let file = File::create(path).map_err(SvmError::IoError)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .map_err(|e| SvmError::SerializationError(e.to_string()))
}

fn load_json<P: AsRef<Path>, T: for<'de> Deserialize<'de>>(path: P) -> Result<T> {
    let file = File::open(path).map_err(SvmError::IoError)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| SvmError::SerializationError(e.to_string()))
}
