//! Error types for permfdr

use thiserror::Error;

/// Main error type for permutation-FDR operations
#[derive(Error, Debug)]
pub enum PermFdrError {
    #[error("Length mismatch: design has {design_len} labels but {measurement_len} measurements were given")]
    LengthMismatch {
        design_len: usize,
        measurement_len: usize,
    },

    #[error("Invalid design label {code} at position {position}: expected 1 (control) or 2 (treatment)")]
    InvalidDesignLabel { code: u8, position: usize },

    #[error("Invalid intensity matrix: {reason}")]
    InvalidIntensityMatrix { reason: String },

    #[error("Shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    #[error("Degenerate test input: {reason}")]
    DegenerateInput { reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for permutation-FDR operations
pub type Result<T> = std::result::Result<T, PermFdrError>;
