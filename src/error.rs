// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use crate::source::Variant;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transform '{stage}' failed for {path}: {message}")]
    Transform {
        path: PathBuf,
        stage: String,
        message: String,
    },

    #[error("Transform '{stage}' failed for phrase '{phrase}': {message}")]
    PhraseTransform {
        phrase: String,
        stage: String,
        message: String,
    },

    #[error("Variant {variant} is not available for {path}")]
    MissingVariant { path: PathBuf, variant: Variant },

    #[error("Alignment error in {path} at sentence {sentence_index}: {detail}")]
    Alignment {
        path: PathBuf,
        sentence_index: usize,
        detail: String,
    },

    #[error("Sentence index {index} out of range ({count} sentences)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for QuizError {
    fn from(e: serde_json::Error) -> Self {
        QuizError::Serialization(e.to_string())
    }
}

impl From<regex::Error> for QuizError {
    fn from(e: regex::Error) -> Self {
        QuizError::Config(format!("invalid word pattern: {}", e))
    }
}
