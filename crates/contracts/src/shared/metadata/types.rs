//! Field declarations and the derived per-type metadata
//!
//! Declarations are `'static` constants written next to each record type.
//! `TypeMetadata` is the partition derived from them and is what the identity
//! engine walks.

use std::collections::HashSet;

use super::error::MetadataError;
use super::field_type::{FieldRole, ValueKind};
use crate::domain::common::Record;

// ============================================================================
// Field-level declaration
// ============================================================================

/// Declaration of a single record field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: &'static str,
    pub kind: ValueKind,
    pub roles: &'static [FieldRole],
}

impl FieldDeclaration {
    /// Rank of the field if it is declared as a key
    pub fn key_order(&self) -> Option<i32> {
        self.roles.iter().find_map(FieldRole::key_order)
    }

    pub fn is_key(&self) -> bool {
        self.key_order().is_some()
    }

    pub fn is_required(&self) -> bool {
        self.roles.contains(&FieldRole::Required)
    }

    pub fn is_info(&self) -> bool {
        self.roles.contains(&FieldRole::Info)
    }
}

// ============================================================================
// Type-level metadata
// ============================================================================

/// Key / required / info partition of one record type's fields
///
/// Immutable once built. A field appears in at most one of the three lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMetadata {
    type_name: &'static str,
    key_fields: Vec<FieldDeclaration>,
    required_fields: Vec<FieldDeclaration>,
    info_fields: Vec<FieldDeclaration>,
}

impl TypeMetadata {
    /// Build metadata for a record type from its static declarations
    pub fn for_record<T: Record>() -> Result<Self, MetadataError> {
        Self::from_declarations(T::TYPE_NAME, T::field_declarations())
    }

    /// Bucket declarations into key/required/info lists
    ///
    /// Key fields are sorted by rank; equal ranks keep declaration order.
    pub fn from_declarations(
        type_name: &'static str,
        declarations: &[FieldDeclaration],
    ) -> Result<Self, MetadataError> {
        let mut seen = HashSet::with_capacity(declarations.len());
        let mut keys: Vec<(i32, FieldDeclaration)> = Vec::new();
        let mut required_fields = Vec::new();
        let mut info_fields = Vec::new();

        for declaration in declarations {
            if declaration.name.is_empty() {
                return Err(MetadataError::EmptyFieldName { type_name });
            }
            if !seen.insert(declaration.name) {
                return Err(MetadataError::DuplicateField {
                    type_name,
                    field: declaration.name,
                });
            }

            let mut ranks = declaration.roles.iter().filter_map(FieldRole::key_order);
            if let Some(first) = ranks.next() {
                if let Some(second) = ranks.find(|rank| *rank != first) {
                    return Err(MetadataError::ConflictingKeyRanks {
                        type_name,
                        field: declaration.name,
                        first,
                        second,
                    });
                }
                keys.push((first, *declaration));
            } else if declaration.is_required() {
                required_fields.push(*declaration);
            } else if declaration.is_info() {
                info_fields.push(*declaration);
            }
        }

        // sort_by_key is stable: ties stay in declaration order
        keys.sort_by_key(|(order, _)| *order);

        Ok(Self {
            type_name,
            key_fields: keys.into_iter().map(|(_, field)| field).collect(),
            required_fields,
            info_fields,
        })
    }

    /// Metadata of a type that declares no roles
    pub fn empty(type_name: &'static str) -> Self {
        Self {
            type_name,
            key_fields: Vec::new(),
            required_fields: Vec::new(),
            info_fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn key_fields(&self) -> &[FieldDeclaration] {
        &self.key_fields
    }

    pub fn required_fields(&self) -> &[FieldDeclaration] {
        &self.required_fields
    }

    pub fn info_fields(&self) -> &[FieldDeclaration] {
        &self.info_fields
    }

    /// Fields checked by validation: key fields, then required fields
    pub fn validated_fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.key_fields.iter().chain(self.required_fields.iter())
    }

    /// Fields shown when rendering: key, required, then info
    pub fn rendered_fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.validated_fields().chain(self.info_fields.iter())
    }

    /// True when the type declares no roles at all
    pub fn is_empty(&self) -> bool {
        self.key_fields.is_empty() && self.required_fields.is_empty() && self.info_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[FieldDeclaration]) -> Vec<&'static str> {
        fields.iter().map(|f| f.name).collect()
    }

    static MIXED: [FieldDeclaration; 6] = [
        FieldDeclaration {
            name: "d",
            kind: ValueKind::Text,
            roles: &[FieldRole::Info],
        },
        FieldDeclaration {
            name: "b",
            kind: ValueKind::Text,
            roles: &[FieldRole::Key { order: 2 }],
        },
        FieldDeclaration {
            name: "c",
            kind: ValueKind::Int,
            roles: &[FieldRole::Required, FieldRole::Info],
        },
        FieldDeclaration {
            name: "a",
            kind: ValueKind::Text,
            roles: &[FieldRole::Required, FieldRole::Key { order: 1 }],
        },
        FieldDeclaration {
            name: "untagged",
            kind: ValueKind::Text,
            roles: &[],
        },
        FieldDeclaration {
            name: "e",
            kind: ValueKind::Text,
            roles: &[FieldRole::Key { order: 2 }],
        },
    ];

    #[test]
    fn partitions_with_precedence() {
        let meta = TypeMetadata::from_declarations("Mixed", &MIXED).unwrap();
        assert_eq!(names(meta.key_fields()), vec!["a", "b", "e"]);
        assert_eq!(names(meta.required_fields()), vec!["c"]);
        assert_eq!(names(meta.info_fields()), vec!["d"]);
        let rendered: Vec<_> = meta.rendered_fields().map(|f| f.name).collect();
        assert_eq!(rendered, vec!["a", "b", "e", "c", "d"]);
    }

    #[test]
    fn empty_declarations_give_empty_metadata() {
        let meta = TypeMetadata::from_declarations("Bare", &[]).unwrap();
        assert!(meta.is_empty());
        assert_eq!(meta.type_name(), "Bare");
    }

    #[test]
    fn duplicate_field_is_rejected() {
        static DUP: [FieldDeclaration; 2] = [
            FieldDeclaration {
                name: "x",
                kind: ValueKind::Int,
                roles: &[FieldRole::Required],
            },
            FieldDeclaration {
                name: "x",
                kind: ValueKind::Int,
                roles: &[FieldRole::Info],
            },
        ];
        let err = TypeMetadata::from_declarations("Dup", &DUP).unwrap_err();
        assert_eq!(
            err,
            MetadataError::DuplicateField {
                type_name: "Dup",
                field: "x"
            }
        );
    }

    #[test]
    fn conflicting_key_ranks_are_rejected() {
        static CONFLICT: [FieldDeclaration; 1] = [FieldDeclaration {
            name: "id",
            kind: ValueKind::Long,
            roles: &[FieldRole::Key { order: 1 }, FieldRole::Key { order: 4 }],
        }];
        let err = TypeMetadata::from_declarations("Conflict", &CONFLICT).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::ConflictingKeyRanks { first: 1, second: 4, .. }
        ));
    }

    #[test]
    fn repeated_identical_key_rank_is_accepted() {
        static SAME: [FieldDeclaration; 1] = [FieldDeclaration {
            name: "id",
            kind: ValueKind::Long,
            roles: &[FieldRole::Key { order: 1 }, FieldRole::Key { order: 1 }],
        }];
        let meta = TypeMetadata::from_declarations("Same", &SAME).unwrap();
        assert_eq!(names(meta.key_fields()), vec!["id"]);
    }

    #[test]
    fn empty_name_is_rejected() {
        static EMPTY: [FieldDeclaration; 1] = [FieldDeclaration {
            name: "",
            kind: ValueKind::Text,
            roles: &[FieldRole::Info],
        }];
        assert_eq!(
            TypeMetadata::from_declarations("Empty", &EMPTY),
            Err(MetadataError::EmptyFieldName { type_name: "Empty" })
        );
    }
}
