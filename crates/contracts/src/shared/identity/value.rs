//! Borrowed view of a record field's value
//!
//! Equality, hashing and ordering follow boxed-value semantics so that hashes
//! stay stable across runs and across record types holding the same values.

use std::any::Any;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;

use crate::shared::metadata::ValueKind;

/// Pattern used for every temporal value when rendering
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;
const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// Value with equality and a structural hash but no ordering
///
/// Implemented for every `Eq + Hash + Display` type, so enums and newtypes
/// can be used as field values without extra code.
pub trait OpaqueValue: fmt::Debug + fmt::Display {
    fn as_any(&self) -> &dyn Any;
    fn opaque_eq(&self, other: &dyn OpaqueValue) -> bool;
    fn opaque_hash(&self) -> i32;
}

impl<T> OpaqueValue for T
where
    T: Any + Eq + Hash + fmt::Debug + fmt::Display,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn opaque_eq(&self, other: &dyn OpaqueValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn opaque_hash(&self) -> i32 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        fold_long(hasher.finish() as i64)
    }
}

#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(Cow<'a, str>),
    Temporal(NaiveDateTime),
    Sequence(Vec<FieldValue<'a>>),
    Opaque(&'a dyn OpaqueValue),
}

impl<'a> FieldValue<'a> {
    /// Kind of the held value, `None` when absent
    pub fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Byte(_) => ValueKind::Byte,
            Self::Short(_) => ValueKind::Short,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Text(_) => ValueKind::Text,
            Self::Temporal(_) => ValueKind::Temporal,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Opaque(_) => ValueKind::Opaque,
        };
        Some(kind)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Absent, empty text or empty sequence
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Value equality; two absent values are equal, values of different kinds never are
    pub fn structural_eq(&self, other: &FieldValue<'_>) -> bool {
        match (self, other) {
            (Self::Null, FieldValue::Null) => true,
            (Self::Bool(a), FieldValue::Bool(b)) => a == b,
            (Self::Byte(a), FieldValue::Byte(b)) => a == b,
            (Self::Short(a), FieldValue::Short(b)) => a == b,
            (Self::Int(a), FieldValue::Int(b)) => a == b,
            (Self::Long(a), FieldValue::Long(b)) => a == b,
            (Self::Float(a), FieldValue::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::Double(a), FieldValue::Double(b)) => double_bits(*a) == double_bits(*b),
            (Self::Text(a), FieldValue::Text(b)) => a == b,
            (Self::Temporal(a), FieldValue::Temporal(b)) => a == b,
            (Self::Sequence(a), FieldValue::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structural_eq(y))
            }
            (Self::Opaque(a), FieldValue::Opaque(b)) => a.opaque_eq(*b),
            _ => false,
        }
    }

    /// 32-bit hash contribution of this value
    ///
    /// boolean: 0 if true else 1; byte/short/int: widened; long: high and low
    /// halves xor-folded; float: IEEE bits; double: IEEE bits folded as a long.
    pub fn field_hash(&self) -> i32 {
        match self {
            Self::Null => 0,
            Self::Bool(b) => {
                if *b {
                    0
                } else {
                    1
                }
            }
            Self::Byte(v) => i32::from(*v),
            Self::Short(v) => i32::from(*v),
            Self::Int(v) => *v,
            Self::Long(v) => fold_long(*v),
            Self::Float(v) => float_bits(*v) as i32,
            Self::Double(v) => fold_long(double_bits(*v) as i64),
            Self::Text(text) => text_hash(text),
            Self::Temporal(at) => fold_long(at.and_utc().timestamp_millis()),
            Self::Sequence(items) => items
                .iter()
                .fold(1i32, |h, item| h.wrapping_mul(31).wrapping_add(item.field_hash())),
            Self::Opaque(value) => value.opaque_hash(),
        }
    }

    /// Ordering for kinds that have one, `None` for sequences, opaque
    /// values, absent values and mismatched kinds
    pub fn native_cmp(&self, other: &FieldValue<'_>) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (Self::Byte(a), FieldValue::Byte(b)) => Some(a.cmp(b)),
            (Self::Short(a), FieldValue::Short(b)) => Some(a.cmp(b)),
            (Self::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (Self::Long(a), FieldValue::Long(b)) => Some(a.cmp(b)),
            (Self::Float(a), FieldValue::Float(b)) => {
                Some(f32::from_bits(float_bits(*a)).total_cmp(&f32::from_bits(float_bits(*b))))
            }
            (Self::Double(a), FieldValue::Double(b)) => {
                Some(f64::from_bits(double_bits(*a)).total_cmp(&f64::from_bits(double_bits(*b))))
            }
            (Self::Text(a), FieldValue::Text(b)) => Some(a.as_ref().cmp(b.as_ref())),
            (Self::Temporal(a), FieldValue::Temporal(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Byte(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            // Debug keeps the trailing ".0" on whole numbers
            Self::Float(v) => write!(f, "{:?}", v),
            Self::Double(v) => write!(f, "{:?}", v),
            Self::Text(text) => f.write_str(text),
            Self::Temporal(at) => write!(f, "{}", at.format(DEFAULT_DATE_PATTERN)),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Opaque(value) => write!(f, "{}", value),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! field_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<$ty> for FieldValue<'a> {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

field_value_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    NaiveDateTime => Temporal,
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(Cow::Borrowed(value.as_str()))
    }
}

impl<'a> From<String> for FieldValue<'a> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<'a> From<&'a [String]> for FieldValue<'a> {
    fn from(values: &'a [String]) -> Self {
        Self::Sequence(values.iter().map(FieldValue::from).collect())
    }
}

impl<'a> From<&'a Vec<String>> for FieldValue<'a> {
    fn from(values: &'a Vec<String>) -> Self {
        Self::from(values.as_slice())
    }
}

// ============================================================================
// Hash helpers
// ============================================================================

/// Fold a 64-bit value into 32 bits: `(int)(v ^ (v >>> 32))`
pub fn fold_long(value: i64) -> i32 {
    (value ^ ((value as u64) >> 32) as i64) as i32
}

/// 31-polynomial over UTF-16 code units, wrapping at 32 bits
pub fn text_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn float_bits(value: f32) -> u32 {
    if value.is_nan() {
        CANONICAL_NAN_F32
    } else {
        value.to_bits()
    }
}

fn double_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN_F64
    } else {
        value.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq, Eq, Hash)]
    enum Grade {
        A,
        B,
    }

    impl fmt::Display for Grade {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    #[test]
    fn primitive_hashes_follow_boxed_semantics() {
        assert_eq!(FieldValue::Bool(true).field_hash(), 0);
        assert_eq!(FieldValue::Bool(false).field_hash(), 1);
        assert_eq!(FieldValue::Byte(-3).field_hash(), -3);
        assert_eq!(FieldValue::Short(300).field_hash(), 300);
        assert_eq!(FieldValue::Int(42).field_hash(), 42);
        assert_eq!(FieldValue::Long(1 << 32).field_hash(), 1);
        assert_eq!(FieldValue::Long(-1).field_hash(), 0);
        assert_eq!(FieldValue::Float(1.0).field_hash(), 0x3f80_0000);
        assert_eq!(FieldValue::Double(1.0).field_hash(), 0x3ff0_0000);
        assert_eq!(FieldValue::Null.field_hash(), 0);
    }

    #[test]
    fn text_hash_matches_polynomial() {
        assert_eq!(text_hash(""), 0);
        assert_eq!(text_hash("a"), 97);
        assert_eq!(text_hash("ab"), 97 * 31 + 98);
        assert_eq!(FieldValue::from("S1").field_hash(), 83 * 31 + 49);
    }

    #[test]
    fn nan_equals_itself() {
        let a = FieldValue::Double(f64::NAN);
        let b = FieldValue::Double(-f64::NAN);
        assert!(a.structural_eq(&b));
        assert_eq!(a.field_hash(), b.field_hash());
        assert_eq!(a.native_cmp(&b), Some(Ordering::Equal));
        assert!(!FieldValue::Double(0.0).structural_eq(&FieldValue::Double(-0.0)));
    }

    #[test]
    fn mixed_kinds_are_unequal_and_unordered() {
        let int = FieldValue::Int(1);
        let long = FieldValue::Long(1);
        assert!(!int.structural_eq(&long));
        assert_eq!(int.native_cmp(&long), None);
    }

    #[test]
    fn sequences_compare_element_wise_without_ordering() {
        let tags = vec!["x".to_string(), "y".to_string()];
        let a = FieldValue::from(&tags);
        let b = FieldValue::Sequence(vec![FieldValue::from("x"), FieldValue::from("y")]);
        assert!(a.structural_eq(&b));
        assert_eq!(a.field_hash(), b.field_hash());
        assert_eq!(a.native_cmp(&b), None);
        assert_eq!(a.to_string(), "[x, y]");
    }

    #[test]
    fn text_slices_convert_to_sequences() {
        let tags = ["x".to_string(), String::new()];
        let value = FieldValue::from(&tags[..]);
        assert_eq!(value.kind(), Some(ValueKind::Sequence));
        assert_eq!(value.to_string(), "[x, ]");
        assert!(FieldValue::from(&tags[..0]).is_missing());

        let code = "S1".to_string();
        assert_eq!(FieldValue::from(&code).kind(), Some(ValueKind::Text));
    }

    #[test]
    fn opaque_values_compare_by_their_own_eq() {
        let a = Grade::A;
        let a2 = Grade::A;
        let b = Grade::B;
        assert!(FieldValue::Opaque(&a).structural_eq(&FieldValue::Opaque(&a2)));
        assert!(!FieldValue::Opaque(&a).structural_eq(&FieldValue::Opaque(&b)));
        assert_eq!(
            FieldValue::Opaque(&a).field_hash(),
            FieldValue::Opaque(&a2).field_hash()
        );
        assert_eq!(FieldValue::Opaque(&a).native_cmp(&FieldValue::Opaque(&b)), None);
        assert!(!FieldValue::Opaque(&a).structural_eq(&FieldValue::Opaque(&7i32)));
    }

    #[test]
    fn missing_values() {
        let empty: Vec<String> = Vec::new();
        assert!(FieldValue::Null.is_missing());
        assert!(FieldValue::from("").is_missing());
        assert!(FieldValue::from(&empty).is_missing());
        assert!(!FieldValue::Int(0).is_missing());
        assert!(!FieldValue::from(" ").is_missing());
        assert!(FieldValue::from(None::<&str>).is_null());
    }

    #[test]
    fn temporal_renders_with_fixed_pattern() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(FieldValue::from(at).to_string(), "2024-03-07T09:05:00");
        assert_eq!(FieldValue::Double(2.0).to_string(), "2.0");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn native_ordering_per_kind() {
        assert_eq!(
            FieldValue::from("S1").native_cmp(&FieldValue::from("S2")),
            Some(Ordering::Less)
        );
        assert_eq!(
            FieldValue::Bool(true).native_cmp(&FieldValue::Bool(false)),
            Some(Ordering::Greater)
        );
        assert_eq!(FieldValue::Null.native_cmp(&FieldValue::Null), None);
    }
}
