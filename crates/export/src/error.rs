use thiserror::Error;

/// Import parsing failure.
///
/// Missing fields are not errors (defaults apply); malformed present values
/// are, and they name the offending row.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to parse JSON import: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("import file is empty")]
    Empty,
}
