//! Equality, hashing and ordering derived from key fields

use std::cmp::Ordering;
use std::sync::Arc;

use super::outcome::{DiagnosticSink, Outcome};
use super::value::FieldValue;
use crate::domain::common::{FieldSource, Record};
use crate::shared::metadata::{
    validate_fields, FieldAccessError, MetadataError, MetadataRegistry, TypeMetadata,
    ValidationError,
};

/// Derives identity operations for any `Record` from its field roles
///
/// Equality, hash and ordering only look at key fields. All of them are
/// best-effort: a field that cannot be read is skipped and reported in the
/// returned `Outcome` instead of failing the call.
#[derive(Debug, Clone)]
pub struct IdentityEngine {
    registry: Arc<MetadataRegistry>,
}

impl IdentityEngine {
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<MetadataRegistry> {
        &self.registry
    }

    pub fn metadata<T: Record>(&self) -> Result<Arc<TypeMetadata>, MetadataError> {
        self.registry.metadata::<T>()
    }

    /// Metadata for the best-effort paths: a build failure is reported and
    /// replaced by an empty partition
    pub(crate) fn metadata_or_empty<T: Record>(&self, sink: &mut DiagnosticSink) -> Arc<TypeMetadata> {
        match self.registry.metadata::<T>() {
            Ok(metadata) => metadata,
            Err(err) => {
                sink.metadata(err);
                Arc::new(TypeMetadata::empty(T::TYPE_NAME))
            }
        }
    }

    // ========================================================================
    // Equality
    // ========================================================================

    /// True when every key field of `a` equals the same field of `b`
    pub fn equals<T: Record>(&self, a: &T, b: Option<&T>) -> Outcome<bool> {
        self.equals_source(a, b.map(|b| b as &dyn FieldSource))
    }

    /// Equality against a candidate of unknown type
    ///
    /// A key field that cannot be read from either side does not falsify
    /// equality; it is skipped and reported.
    pub fn equals_source<T: Record>(&self, a: &T, other: Option<&dyn FieldSource>) -> Outcome<bool> {
        let mut sink = DiagnosticSink::new(T::TYPE_NAME, "equals");
        let Some(other) = other else {
            return sink.finish(false);
        };

        let metadata = self.metadata_or_empty::<T>(&mut sink);
        for field in metadata.key_fields() {
            let (this_value, other_value) = match read_pair(a, other, field.name) {
                Ok(pair) => pair,
                Err(err) => {
                    sink.field_access(err);
                    continue;
                }
            };
            if !this_value.structural_eq(&other_value) {
                return sink.finish(false);
            }
        }
        sink.finish(true)
    }

    // ========================================================================
    // Hash
    // ========================================================================

    /// `h = 37 * h + field_hash(value)` over key fields, seeded at 0
    pub fn hash<T: Record>(&self, a: &T) -> Outcome<i32> {
        let mut sink = DiagnosticSink::new(T::TYPE_NAME, "hash");
        let metadata = self.metadata_or_empty::<T>(&mut sink);

        let mut hash_code = 0i32;
        for field in metadata.key_fields() {
            match a.read_field(field.name) {
                Ok(value) => {
                    hash_code = hash_code.wrapping_mul(37).wrapping_add(value.field_hash());
                }
                Err(err) => sink.field_access(err),
            }
        }
        sink.finish(hash_code)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Three-way comparison on key fields in rank order
    ///
    /// An absent `b` orders before any record. Equal records compare `Equal`.
    /// Fields without a natural order (sequences, opaque values) fall back to
    /// comparing hash codes, which is not transitive; every such fallback is
    /// reported as `Diagnostic::UnstableOrdering`.
    pub fn compare<T: Record>(&self, a: &T, b: Option<&T>) -> Outcome<Ordering> {
        self.compare_source(a, b.map(|b| b as &dyn FieldSource))
    }

    pub fn compare_source<T: Record>(
        &self,
        a: &T,
        other: Option<&dyn FieldSource>,
    ) -> Outcome<Ordering> {
        let mut sink = DiagnosticSink::new(T::TYPE_NAME, "compare");
        let Some(other) = other else {
            return sink.finish(Ordering::Greater);
        };

        let equality = self.equals_source(a, Some(other));
        sink.absorb(equality.diagnostics);
        if equality.value {
            return sink.finish(Ordering::Equal);
        }

        let metadata = self.metadata_or_empty::<T>(&mut sink);
        for field in metadata.key_fields() {
            let (this_value, other_value) = match read_pair(a, other, field.name) {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::error!(field = field.name, "Error comparing objects: {}", err);
                    continue;
                }
            };

            let ordering = match (this_value.is_null(), other_value.is_null()) {
                (true, true) => Ordering::Equal,
                (false, true) => Ordering::Greater,
                (true, false) => Ordering::Less,
                (false, false) => match this_value.native_cmp(&other_value) {
                    Some(ordering) => ordering,
                    None if this_value.structural_eq(&other_value) => Ordering::Equal,
                    None => {
                        sink.unstable_ordering(field.name);
                        if this_value.field_hash() > other_value.field_hash() {
                            Ordering::Greater
                        } else {
                            Ordering::Less
                        }
                    }
                },
            };

            if ordering != Ordering::Equal {
                return sink.finish(ordering);
            }
        }
        sink.finish(Ordering::Equal)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Strict check that all key and required fields are populated
    pub fn validate<T: Record>(&self, a: &T) -> Result<(), ValidationError> {
        let metadata = self.registry.metadata::<T>()?;
        validate_fields(&metadata, a)
    }
}

fn read_pair<'a, 'b>(
    a: &'a dyn FieldSource,
    b: &'b dyn FieldSource,
    name: &str,
) -> Result<(FieldValue<'a>, FieldValue<'b>), FieldAccessError> {
    Ok((a.read_field(name)?, b.read_field(name)?))
}
