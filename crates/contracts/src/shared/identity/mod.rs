//! Record identity derived from field roles
//!
//! `IdentityEngine` turns a record's key/required/info declaration into
//! equality, hashing, ordering, rendering and validation. Identity and
//! rendering never fail: problems come back as diagnostics on an `Outcome`.
//! Validation is strict and returns the first failure.

mod engine;
mod outcome;
mod render;
mod value;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::shared::metadata::MetadataRegistry;

pub use engine::IdentityEngine;
pub use outcome::{Diagnostic, Outcome};
pub use value::{fold_long, text_hash, FieldValue, OpaqueValue, DEFAULT_DATE_PATTERN};

static DEFAULT_ENGINE: Lazy<IdentityEngine> =
    Lazy::new(|| IdentityEngine::new(Arc::new(MetadataRegistry::new())));

/// Engine behind the std trait impls generated by `impl_record_traits!`
///
/// Code that can hold an engine should construct one with its own registry;
/// this instance only exists because `PartialEq`, `Hash` and friends take no
/// extra arguments.
pub fn default_engine() -> &'static IdentityEngine {
    &DEFAULT_ENGINE
}

/// Implement `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord` and `Display`
/// for a record through the default engine
///
/// Only use on records whose key fields all have a natural order; otherwise
/// `Ord` inherits the hash fallback and is not a total order.
#[macro_export]
macro_rules! impl_record_traits {
    ($ty:ty) => {
        impl ::core::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::shared::identity::default_engine()
                    .equals(self, Some(other))
                    .value
            }
        }

        impl ::core::cmp::Eq for $ty {}

        impl ::core::hash::Hash for $ty {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_i32($crate::shared::identity::default_engine().hash(self).value);
            }
        }

        impl ::core::cmp::PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<::core::cmp::Ordering> {
                Some(::core::cmp::Ord::cmp(self, other))
            }
        }

        impl ::core::cmp::Ord for $ty {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                $crate::shared::identity::default_engine()
                    .compare(self, Some(other))
                    .value
            }
        }

        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::shared::identity::default_engine().render(self).value)
            }
        }
    };
}
