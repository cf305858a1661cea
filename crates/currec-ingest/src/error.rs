use thiserror::Error;

/// Errors from import parsing.
///
/// Malformed curriculum *content* is never an error here; it surfaces as
/// validation issues on the import outcome instead. Only input that is not
/// JSON at all is rejected outright.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
