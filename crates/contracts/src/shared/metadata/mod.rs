//! Field-role metadata for records
//!
//! Each record type declares, once and at compile time, which of its fields
//! form its identity (`Key`), which must be filled in (`Required`) and which
//! are descriptive (`Info`). Everything else (equality, ordering, hashing,
//! rendering, validation) is derived from that declaration.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::metadata::MetadataRegistry;
//! use contracts::domain::a003_item::Item;
//!
//! let registry = MetadataRegistry::new();
//! let meta = registry.register::<Item>()?;
//! for field in meta.key_fields() {
//!     println!("{}: {}", field.name, field.kind.as_str());
//! }
//! ```

mod error;
mod field_type;
mod registry;
mod types;
mod validation;

pub use error::{FieldAccessError, MetadataError};
pub use field_type::{FieldRole, ValueKind};
pub use registry::MetadataRegistry;
pub use types::{FieldDeclaration, TypeMetadata};
pub use validation::{validate_fields, ValidationError};
