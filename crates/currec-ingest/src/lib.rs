#![deny(unsafe_code)]

pub mod error;
pub mod import;

pub use error::{IngestError, Result};
pub use import::{ImportOutcome, ValidationIssue, coerce_unit_number, parse_import};
