use thiserror::Error;

/// Malformed role declarations, detected when a record type's metadata is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("{type_name}: field declared with an empty name")]
    EmptyFieldName { type_name: &'static str },

    #[error("{type_name}: field '{field}' is declared more than once")]
    DuplicateField {
        type_name: &'static str,
        field: &'static str,
    },

    #[error("{type_name}: key field '{field}' has conflicting ranks {first} and {second}")]
    ConflictingKeyRanks {
        type_name: &'static str,
        field: &'static str,
        first: i32,
        second: i32,
    },
}

/// A field listed in metadata could not be read from a record instance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldAccessError {
    #[error("{type_name} has no field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("field '{field}' of {type_name} is unreadable: {reason}")]
    Unreadable {
        type_name: String,
        field: String,
        reason: String,
    },
}

impl FieldAccessError {
    pub fn unknown(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn unreadable(
        type_name: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unreadable {
            type_name: type_name.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field, .. } | Self::Unreadable { field, .. } => field,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "UnknownField",
            Self::Unreadable { .. } => "Unreadable",
        }
    }
}
