//! Error types for Guard Card

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardCardError {
    // Input errors
    #[error("Invalid coordinate {field}={value}: {reason}")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        reason: String,
    },

    #[error("Invalid search radius {value}: radius must be a number")]
    InvalidRadius { value: f64 },

    // Dataset errors
    #[error("Dataset not found: {name}")]
    DatasetNotFound { name: String },

    #[error("Duplicate facility id '{id}' in dataset {dataset}")]
    DuplicateFacilityId { dataset: String, id: String },

    #[error("Failed to parse {path}: {reason}")]
    DatasetParse { path: PathBuf, reason: String },

    // Quiz errors
    #[error("Quiz category not found: {id}")]
    QuizNotFound { id: String },

    #[error("Expected {expected} answers for quiz {category}, got {actual}")]
    AnswerCountMismatch {
        category: String,
        expected: usize,
        actual: usize,
    },

    #[error("Answer {answer} for question {question} is out of range (0..{choices})")]
    AnswerOutOfRange {
        question: String,
        answer: usize,
        choices: usize,
    },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GuardCardError>;
