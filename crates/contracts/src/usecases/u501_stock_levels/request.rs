use serde::{Deserialize, Serialize};

use crate::domain::a003_item::Item;

/// Stock level of one product at one location
///
/// Used both as input (set/adjust) and output (listing). On input
/// `product_name` is only needed when the product does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    #[serde(rename = "productId")]
    pub product_id: String,

    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,

    #[serde(rename = "locationCode")]
    pub location_code: String,

    pub quantity: i32,
}

impl StockLevel {
    pub fn new(
        product_id: impl Into<String>,
        product_name: Option<String>,
        location_code: impl Into<String>,
        quantity: i32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name,
            location_code: location_code.into(),
            quantity,
        }
    }

    /// Item record carrying this level's quantity
    pub fn to_item(&self) -> Item {
        Item::new(self.product_id.clone(), self.location_code.clone(), self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_is_optional_on_input() {
        let level: StockLevel = serde_json::from_str(
            r#"{ "productId": "A-0", "locationCode": "S0", "quantity": 5 }"#,
        )
        .unwrap();
        assert_eq!(level, StockLevel::new("A-0", None, "S0", 5));
        assert_eq!(level.to_item().quantity, 5);
    }
}
