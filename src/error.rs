use thiserror::Error;

/// Errors raised while building, remapping or persisting a patch field.
#[derive(Debug, Error)]
pub enum Error {
    #[error("required entry `{0}` not found in dictionary")]
    MissingKey(String),

    #[error("entry `{key}` is not a {expected}")]
    InvalidEntry { key: String, expected: &'static str },

    #[error("parameter `{name}` = {value} is invalid: must be {requirement}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("unknown patch field type `{name}`, valid types are {available:?}")]
    UnknownPatchType {
        name: String,
        available: Vec<String>,
    },

    #[error("size mismatch for {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid patch geometry: {0}")]
    InvalidGeometry(String),

    #[error("face {face} refers to cell {cell}, but the internal field has {ncells} cells")]
    CellOutOfRange {
        face: usize,
        cell: usize,
        ncells: usize,
    },

    #[error("invalid face mapping: {0}")]
    InvalidMapping(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
