use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid subject code: {0:?}")]
    InvalidSubjectCode(String),
    #[error("invalid year number: {0}")]
    InvalidYearNumber(i64),
    #[error("invalid semester number: {0}")]
    InvalidSemesterNumber(i64),
}

pub type Result<T> = std::result::Result<T, ModelError>;
