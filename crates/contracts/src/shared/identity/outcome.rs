use std::fmt;

use crate::shared::metadata::{FieldAccessError, MetadataError};

/// Problem noticed while running a best-effort operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field was skipped because it could not be read
    FieldAccess {
        type_name: &'static str,
        error: FieldAccessError,
    },
    /// Ordering fell back to comparing hashes of values without a native order
    UnstableOrdering {
        type_name: &'static str,
        field: &'static str,
    },
    /// Metadata for the type could not be built; no fields were walked
    Metadata(MetadataError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldAccess { type_name, error } => {
                write!(f, "{}: field skipped: {}", type_name, error)
            }
            Self::UnstableOrdering { type_name, field } => write!(
                f,
                "{}: field '{}' has no natural order, ordered by hash",
                type_name, field
            ),
            Self::Metadata(err) => write!(f, "metadata unavailable: {}", err),
        }
    }
}

/// Result of a best-effort operation together with what went wrong on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Collects diagnostics for one operation and logs each as it arrives
#[derive(Debug)]
pub(crate) struct DiagnosticSink {
    type_name: &'static str,
    operation: &'static str,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn new(type_name: &'static str, operation: &'static str) -> Self {
        Self {
            type_name,
            operation,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn field_access(&mut self, error: FieldAccessError) {
        tracing::warn!(
            type_name = self.type_name,
            operation = self.operation,
            field = error.field(),
            "{} - {}",
            error.kind_name(),
            error
        );
        self.diagnostics.push(Diagnostic::FieldAccess {
            type_name: self.type_name,
            error,
        });
    }

    pub(crate) fn unstable_ordering(&mut self, field: &'static str) {
        tracing::warn!(
            type_name = self.type_name,
            field,
            "Ordering by hash code: field has no natural order"
        );
        self.diagnostics.push(Diagnostic::UnstableOrdering {
            type_name: self.type_name,
            field,
        });
    }

    pub(crate) fn metadata(&mut self, error: MetadataError) {
        tracing::error!(
            type_name = self.type_name,
            operation = self.operation,
            "Record metadata unavailable: {}",
            error
        );
        self.diagnostics.push(Diagnostic::Metadata(error));
    }

    pub(crate) fn absorb(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub(crate) fn finish<T>(self, value: T) -> Outcome<T> {
        Outcome {
            value,
            diagnostics: self.diagnostics,
        }
    }
}
