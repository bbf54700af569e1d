//! Error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvmError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid label: expected -1 or +1, got {0}")]
    InvalidLabel(f64),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Class labels must be exactly the range [0, {num_classes}), found gaps")]
    NonContiguousLabels { num_classes: usize },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, SvmError>;
