use std::{fmt, io};

use spend_domain::{ParseGranularityError, ParseWeekStartError};
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Input field rejected while creating a record or category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Date,
    Category,
    OtherCategory,
    Amount,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordField::Date => "date",
            RecordField::Category => "category",
            RecordField::OtherCategory => "custom category name",
            RecordField::Amount => "amount",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: missing or invalid {}", join_fields(.fields))]
    Validation { fields: Vec<RecordField> },
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    pub fn invalid(field: RecordField) -> Self {
        CoreError::Validation {
            fields: vec![field],
        }
    }

    /// Fields named by a validation failure; empty for other kinds.
    pub fn invalid_fields(&self) -> &[RecordField] {
        match self {
            CoreError::Validation { fields } => fields,
            _ => &[],
        }
    }
}

impl From<ParseGranularityError> for CoreError {
    fn from(err: ParseGranularityError) -> Self {
        CoreError::Configuration(err.to_string())
    }
}

impl From<ParseWeekStartError> for CoreError {
    fn from(err: ParseWeekStartError) -> Self {
        CoreError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}

fn join_fields(fields: &[RecordField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
