use serde::{Deserialize, Serialize};

use crate::domain::common::{FieldSource, Record};
use crate::impl_record_traits;
use crate::shared::identity::FieldValue;
use crate::shared::metadata::{FieldAccessError, FieldDeclaration, FieldRole, ValueKind};

// ============================================================================
// Record
// ============================================================================

/// Store or warehouse holding stock, identified by its code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub name: String,
}

impl Location {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

// ============================================================================
// Field roles
// ============================================================================

static LOCATION_FIELDS: [FieldDeclaration; 2] = [
    FieldDeclaration {
        name: "code",
        kind: ValueKind::Text,
        roles: &[FieldRole::Key { order: 1 }],
    },
    FieldDeclaration {
        name: "name",
        kind: ValueKind::Text,
        roles: &[FieldRole::Required],
    },
];

impl FieldSource for Location {
    fn read_field(&self, name: &str) -> Result<FieldValue<'_>, FieldAccessError> {
        match name {
            "code" => Ok(FieldValue::from(&self.code)),
            "name" => Ok(FieldValue::from(&self.name)),
            other => Err(FieldAccessError::unknown(Self::TYPE_NAME, other)),
        }
    }
}

impl Record for Location {
    const TYPE_NAME: &'static str = "Location";

    fn field_declarations() -> &'static [FieldDeclaration] {
        &LOCATION_FIELDS
    }
}

impl_record_traits!(Location);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_code_only() {
        let a = Location::new("S1", "Store 1");
        let b = Location::new("S1", "Store 2");
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(a.to_string(), "Location(code=S1,name=Store 1)");
        assert_eq!(b.to_string(), "Location(code=S1,name=Store 2)");
    }

    #[test]
    fn unknown_field_is_reported() {
        let a = Location::new("S1", "Store 1");
        let err = a.read_field("address").unwrap_err();
        assert_eq!(err, FieldAccessError::unknown("Location", "address"));
    }
}
