use serde::{Deserialize, Serialize};

use crate::domain::common::{FieldSource, Record};
use crate::impl_record_traits;
use crate::shared::identity::FieldValue;
use crate::shared::metadata::{FieldAccessError, FieldDeclaration, FieldRole, ValueKind};

// ============================================================================
// Record
// ============================================================================

/// Quantity of one product held at one location
///
/// Identity is the (product, location) pair; the quantity is required but
/// does not take part in equality or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "locationCode")]
    pub location_code: String,
    pub quantity: i32,
}

impl Item {
    pub fn new(product_id: impl Into<String>, location_code: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            location_code: location_code.into(),
            quantity,
        }
    }
}

// ============================================================================
// Field roles
// ============================================================================

static ITEM_FIELDS: [FieldDeclaration; 3] = [
    FieldDeclaration {
        name: "productId",
        kind: ValueKind::Text,
        roles: &[FieldRole::Key { order: 1 }],
    },
    FieldDeclaration {
        name: "locationCode",
        kind: ValueKind::Text,
        roles: &[FieldRole::Key { order: 2 }],
    },
    FieldDeclaration {
        name: "quantity",
        kind: ValueKind::Int,
        roles: &[FieldRole::Required],
    },
];

impl FieldSource for Item {
    fn read_field(&self, name: &str) -> Result<FieldValue<'_>, FieldAccessError> {
        match name {
            "productId" => Ok(FieldValue::from(&self.product_id)),
            "locationCode" => Ok(FieldValue::from(&self.location_code)),
            "quantity" => Ok(FieldValue::from(self.quantity)),
            other => Err(FieldAccessError::unknown(Self::TYPE_NAME, other)),
        }
    }
}

impl Record for Item {
    const TYPE_NAME: &'static str = "Item";

    fn field_declarations() -> &'static [FieldDeclaration] {
        &ITEM_FIELDS
    }
}

impl_record_traits!(Item);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn quantity_does_not_affect_identity() {
        let a = Item::new("GH-100", "S1", 10);
        let b = Item::new("GH-100", "S1", 999);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Item(productId=GH-100,locationCode=S1,quantity=10)");
    }

    #[test]
    fn sorted_by_product_then_location() {
        let items: BTreeSet<Item> = [
            Item::new("B", "S1", 1),
            Item::new("A", "S2", 1),
            Item::new("A", "S1", 1),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = items
            .iter()
            .map(|i| format!("{}/{}", i.product_id, i.location_code))
            .collect();
        assert_eq!(keys, vec!["A/S1", "A/S2", "B/S1"]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Item::new("GH-100", "S1", 3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "productId": "GH-100", "locationCode": "S1", "quantity": 3 })
        );
    }
}
