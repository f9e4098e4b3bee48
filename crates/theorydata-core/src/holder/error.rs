use thiserror::Error;

use crate::case::CaseError;
use crate::row::RowError;

/// Errors that can occur while filling or editing a row holder.
#[derive(Debug, Error, PartialEq)]
pub enum HolderError {
    #[error("Type mismatch: holder contains '{expected}' cases, got '{actual}'")]
    TypeMismatch { expected: String, actual: String },

    #[error("No row named '{0}'")]
    RowNotFound(String),

    #[error(transparent)]
    Case(#[from] CaseError),

    #[error(transparent)]
    Row(#[from] RowError),
}

impl HolderError {
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        HolderError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
