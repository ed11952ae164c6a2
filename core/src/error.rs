use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Empty identifier set for filter column '{column}'")]
    EmptyIdSet { column: String },

    #[error("Base case '{label}' not found among scenario rows")]
    BaseCaseNotFound { label: String },

    #[error("Simulation metadata missing or ambiguous: expected exactly one info row, found {found}")]
    MetadataMissing { found: usize },

    #[error("Metric table row '{scenario}' has {got} values, expected {expected}")]
    RowWidthMismatch {
        scenario: String,
        expected: usize,
        got: usize,
    },

    #[error("Unknown placeholder '{name}' in template {template:?}")]
    UnknownPlaceholder { name: String, template: PathBuf },

    #[error("Engine run failed: {reason}")]
    EngineFailure { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SweepResult<T> = Result<T, SweepError>;
