//! Error types used by this lib.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("frame buffer holds {actual} bytes, expected {expected} for the declared dimensions")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("IO error reading frame: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading calibration configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse calibration configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("configuration field `{field}` must be non-zero")]
    ZeroDimension { field: &'static str },
    #[error("configuration field `{field}` must be positive, got {value}")]
    NonPositiveParameter { field: &'static str, value: f64 },
    #[error("reference window [{lo}, {hi}) violates 0 <= lo < hi <= {nsample}")]
    InvalidWindow { lo: i64, hi: i64, nsample: usize },
}

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error(
        "zero-magnitude peak for antenna pair (tx {tx}, rx {rx}) at range bin {bin}; \
         phase/amplitude ratio is undefined"
    )]
    ZeroPeak { tx: usize, rx: usize, bin: usize },
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error in file persistence: {0}")]
    Io(#[from] std::io::Error),
    #[error("error writing calibration context: {0}")]
    Json(#[from] serde_json::Error),
}
