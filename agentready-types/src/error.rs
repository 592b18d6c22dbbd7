//! Construction-time validation errors.
//!
//! These are raised immediately and never coerced; callers surface them as a
//! hard failure of the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Tier must be 1, 2, 3, or 4 (got {0})")]
    InvalidTier(u8),

    #[error("Default weight must be between 0 and 1 for attribute '{attribute_id}' (got {weight})")]
    InvalidWeight { attribute_id: String, weight: f64 },

    #[error("Score must be between 0 and 100 for attribute '{attribute_id}' (got {score})")]
    InvalidScore { attribute_id: String, score: f64 },

    #[error("Status must be one of pass, fail, skipped, error (got '{0}')")]
    InvalidStatus(String),

    #[error("Overall score must be between 0 and 100 (got {0})")]
    InvalidOverallScore(f64),

    #[error("Repository path does not exist: {0}")]
    PathDoesNotExist(String),

    #[error("Repository path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Duplicate attribute id '{0}'")]
    DuplicateAttribute(String),

    #[error("Config weights must sum to 1.0 (got {sum:.4})")]
    WeightsSum { sum: f64 },

    #[error(
        "attributes_assessed ({assessed}) + attributes_skipped ({skipped}) must equal attributes_total ({total})"
    )]
    CountMismatch {
        assessed: u64,
        skipped: u64,
        total: u64,
    },

    #[error("findings count ({findings}) must equal attributes_total ({total})")]
    FindingCountMismatch { findings: u64, total: u64 },

    #[error("certification level '{stored}' does not match score {score} (expected '{expected}')")]
    CertificationMismatch {
        stored: String,
        expected: String,
        score: f64,
    },

    #[error("unsupported schema version '{0}'")]
    UnsupportedSchemaVersion(String),
}
