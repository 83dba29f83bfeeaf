use crate::shared::identity::FieldValue;
use crate::shared::metadata::{FieldAccessError, FieldDeclaration};

/// Read access to a record's fields by name
///
/// Object safe, so a record can be compared with a candidate whose concrete
/// type is not known.
pub trait FieldSource {
    fn read_field(&self, name: &str) -> Result<FieldValue<'_>, FieldAccessError>;
}

/// Trait for records whose identity is derived from declared field roles
///
/// A record states its roles once, as a static slice of declarations in
/// source order, and gets equality, hashing, ordering, rendering and
/// validation from `IdentityEngine`.
pub trait Record: FieldSource + 'static {
    /// Name used when rendering (for example "Location")
    const TYPE_NAME: &'static str;

    /// Field declarations in source order
    fn field_declarations() -> &'static [FieldDeclaration];
}
