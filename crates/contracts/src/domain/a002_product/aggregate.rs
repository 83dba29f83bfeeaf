use serde::{Deserialize, Serialize};

use crate::domain::common::{FieldSource, Record};
use crate::impl_record_traits;
use crate::shared::identity::FieldValue;
use crate::shared::metadata::{FieldAccessError, FieldDeclaration, FieldRole, ValueKind};

/// Stocked product, identified by its product id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

static PRODUCT_FIELDS: [FieldDeclaration; 2] = [
    FieldDeclaration {
        name: "id",
        kind: ValueKind::Text,
        roles: &[FieldRole::Key { order: 1 }],
    },
    FieldDeclaration {
        name: "name",
        kind: ValueKind::Text,
        roles: &[FieldRole::Required],
    },
];

impl FieldSource for Product {
    fn read_field(&self, name: &str) -> Result<FieldValue<'_>, FieldAccessError> {
        match name {
            "id" => Ok(FieldValue::from(&self.id)),
            "name" => Ok(FieldValue::from(&self.name)),
            other => Err(FieldAccessError::unknown(Self::TYPE_NAME, other)),
        }
    }
}

impl Record for Product {
    const TYPE_NAME: &'static str = "Product";

    fn field_declarations() -> &'static [FieldDeclaration] {
        &PRODUCT_FIELDS
    }
}

impl_record_traits!(Product);
