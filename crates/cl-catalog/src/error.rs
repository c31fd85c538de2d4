//! Catalog Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("Operation `{operation}` failed for `{key}`: {source}")]
    OperationFailed {
        operation: String,
        key: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn duplicate(entity_type: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn operation_failed(
        operation: impl Into<String>,
        key: impl Into<String>,
        source: mongodb::error::Error,
    ) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            key: key.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }
}

/// Server error code raised on unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a driver error is a duplicate-key write failure.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == DUPLICATE_KEY_CODE
    )
}

pub type Result<T> = std::result::Result<T, CatalogError>;
