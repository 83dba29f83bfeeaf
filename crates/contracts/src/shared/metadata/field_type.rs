//! Field roles and value kinds for the record metadata system

/// Role a field plays in a record's identity
///
/// A field may declare several roles; the effective role is resolved with
/// precedence `Key` > `Required` > `Info` when metadata is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// Identity field, ranked by `order` among the other key fields
    Key { order: i32 },
    /// Must be present and non-empty for the record to validate
    Required,
    /// Descriptive, only shown when rendering
    Info,
}

impl FieldRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Key { .. } => "key",
            Self::Required => "required",
            Self::Info => "info",
        }
    }

    pub fn key_order(&self) -> Option<i32> {
        match self {
            Self::Key { order } => Some(*order),
            _ => None,
        }
    }
}

/// Category of value held by a field, used for hashing and ordering dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    #[default]
    Text,
    /// `chrono::NaiveDateTime`
    Temporal,
    /// List of text values
    Sequence,
    /// Equality and hash only, no ordering
    Opaque,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Text => "text",
            Self::Temporal => "temporal",
            Self::Sequence => "sequence",
            Self::Opaque => "opaque",
        }
    }

    /// Whether two values of this kind can be put in a total order
    pub fn has_native_ordering(&self) -> bool {
        !matches!(self, Self::Sequence | Self::Opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_order_only_for_key_role() {
        assert_eq!(FieldRole::Key { order: 3 }.key_order(), Some(3));
        assert_eq!(FieldRole::Required.key_order(), None);
        assert_eq!(FieldRole::Info.as_str(), "info");
    }

    #[test]
    fn opaque_and_sequence_have_no_ordering() {
        assert!(ValueKind::Text.has_native_ordering());
        assert!(ValueKind::Temporal.has_native_ordering());
        assert!(!ValueKind::Sequence.has_native_ordering());
        assert!(!ValueKind::Opaque.has_native_ordering());
    }
}
