//! Validation of key and required fields
//!
//! Strict counterpart of the best-effort identity operations: the first
//! missing value or unreadable field is returned as an error.

use thiserror::Error;

use super::error::{FieldAccessError, MetadataError};
use super::types::TypeMetadata;
use crate::domain::common::FieldSource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required value missing: {field}")]
    MissingValue { field: &'static str },

    #[error("Error getting field '{field}' value: {source}")]
    FieldAccess {
        field: &'static str,
        #[source]
        source: FieldAccessError,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl ValidationError {
    /// Name of the offending field, if the failure is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingValue { field } | Self::FieldAccess { field, .. } => Some(field),
            Self::Metadata(_) => None,
        }
    }
}

/// Check that every key and required field is present and non-empty
///
/// Fails fast on the first field that is absent, an empty text or an empty
/// sequence. Fields are checked in key order, then required order.
pub fn validate_fields(
    metadata: &TypeMetadata,
    record: &dyn FieldSource,
) -> Result<(), ValidationError> {
    for field in metadata.validated_fields() {
        let value = record
            .read_field(field.name)
            .map_err(|source| ValidationError::FieldAccess {
                field: field.name,
                source,
            })?;
        if value.is_missing() {
            return Err(ValidationError::MissingValue { field: field.name });
        }
    }
    Ok(())
}
