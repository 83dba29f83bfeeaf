//! Storage boundary for locations, products and items
//!
//! Records are kept in ordered sets, so listings come out in record order:
//! locations by code, products by id, items by product then location.
//! Lookups build a probe record carrying only the key fields.

use std::collections::BTreeSet;

use contracts::domain::a001_location::Location;
use contracts::domain::a002_product::Product;
use contracts::domain::a003_item::Item;
use contracts::domain::common::Record;
use contracts::shared::identity::IdentityEngine;
use contracts::shared::metadata::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Invalid {record}: {source}")]
    Validation {
        record: String,
        #[source]
        source: ValidationError,
    },

    #[error("Quantity of ProductID [{product_id}] at [{location_code}] is out of range")]
    QuantityOverflow {
        product_id: String,
        location_code: String,
    },
}

pub trait StockRepository {
    fn save_location(&mut self, location: Location) -> Result<(), RepositoryError>;
    fn find_location(&self, code: &str) -> Option<Location>;
    fn list_locations(&self) -> Vec<Location>;

    fn save_product(&mut self, product: Product) -> Result<(), RepositoryError>;
    fn list_products(&self) -> Vec<Product>;

    /// Insert the item or overwrite the quantity of the existing one
    fn save_item(&mut self, item: Item) -> Result<(), RepositoryError>;
    /// Add the item's quantity to the existing one, inserting it if absent
    fn add_quantity(&mut self, item: Item) -> Result<(), RepositoryError>;
    fn find_item(&self, product_id: &str, location_code: &str) -> Option<Item>;
    fn list_items(&self) -> Vec<Item>;
    fn list_items_for(&self, product_ids: &[String]) -> Vec<Item>;
}

/// In-memory stock store
///
/// Validation and rendering go through the injected engine. Set ordering and
/// key lookups use the records' `Ord`, which `impl_record_traits!` wires to
/// `default_engine()` and its own registry. Both registries derive the same
/// metadata from the same static declarations.
#[derive(Debug, Clone)]
pub struct InMemoryStockRepository {
    engine: IdentityEngine,
    locations: BTreeSet<Location>,
    products: BTreeSet<Product>,
    items: BTreeSet<Item>,
}

impl InMemoryStockRepository {
    pub fn new(engine: IdentityEngine) -> Self {
        Self {
            engine,
            locations: BTreeSet::new(),
            products: BTreeSet::new(),
            items: BTreeSet::new(),
        }
    }

    fn checked<T: Record>(&self, record: T) -> Result<T, RepositoryError> {
        match self.engine.validate(&record) {
            Ok(()) => Ok(record),
            Err(source) => {
                let rendered = self.engine.render(&record).value;
                tracing::warn!(record = %rendered, "Rejected invalid record: {}", source);
                Err(RepositoryError::Validation {
                    record: rendered,
                    source,
                })
            }
        }
    }
}

impl StockRepository for InMemoryStockRepository {
    fn save_location(&mut self, location: Location) -> Result<(), RepositoryError> {
        let location = self.checked(location)?;
        tracing::debug!(record = %self.engine.render(&location).value, "Saving location");
        self.locations.replace(location);
        Ok(())
    }

    fn find_location(&self, code: &str) -> Option<Location> {
        self.locations.get(&Location::new(code, "")).cloned()
    }

    fn list_locations(&self) -> Vec<Location> {
        self.locations.iter().cloned().collect()
    }

    fn save_product(&mut self, product: Product) -> Result<(), RepositoryError> {
        let product = self.checked(product)?;
        tracing::debug!(record = %self.engine.render(&product).value, "Saving product");
        self.products.replace(product);
        Ok(())
    }

    fn list_products(&self) -> Vec<Product> {
        self.products.iter().cloned().collect()
    }

    fn save_item(&mut self, item: Item) -> Result<(), RepositoryError> {
        let item = self.checked(item)?;
        tracing::debug!(record = %self.engine.render(&item).value, "Saving item");
        self.items.replace(item);
        Ok(())
    }

    fn add_quantity(&mut self, item: Item) -> Result<(), RepositoryError> {
        let mut item = self.checked(item)?;
        if let Some(existing) = self.items.get(&item) {
            item.quantity = item.quantity.checked_add(existing.quantity).ok_or_else(|| {
                RepositoryError::QuantityOverflow {
                    product_id: item.product_id.clone(),
                    location_code: item.location_code.clone(),
                }
            })?;
        }
        tracing::debug!(record = %self.engine.render(&item).value, "Adding quantity");
        self.items.replace(item);
        Ok(())
    }

    fn find_item(&self, product_id: &str, location_code: &str) -> Option<Item> {
        self.items.get(&Item::new(product_id, location_code, 0)).cloned()
    }

    fn list_items(&self) -> Vec<Item> {
        self.items.iter().cloned().collect()
    }

    fn list_items_for(&self, product_ids: &[String]) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| product_ids.contains(&item.product_id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::metadata::MetadataRegistry;
    use std::sync::Arc;

    fn repository() -> InMemoryStockRepository {
        InMemoryStockRepository::new(IdentityEngine::new(Arc::new(MetadataRegistry::new())))
    }

    #[test]
    fn save_overwrites_by_key() {
        let mut repo = repository();
        repo.save_location(Location::new("S1", "Store 1")).unwrap();
        repo.save_location(Location::new("S1", "Main store")).unwrap();
        assert_eq!(repo.list_locations().len(), 1);
        assert_eq!(repo.find_location("S1").unwrap().name, "Main store");
        assert!(repo.find_location("S9").is_none());
    }

    #[test]
    fn invalid_records_are_rejected() {
        let mut repo = repository();
        let err = repo.save_product(Product::new("A-0", "")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid Product(id=A-0,name=): Required value missing: name"
        );
        assert!(repo.list_products().is_empty());
    }

    #[test]
    fn add_quantity_increments_or_inserts() {
        let mut repo = repository();
        repo.add_quantity(Item::new("A-0", "S1", 5)).unwrap();
        repo.add_quantity(Item::new("A-0", "S1", -2)).unwrap();
        repo.add_quantity(Item::new("A-0", "S0", 1)).unwrap();
        assert_eq!(repo.find_item("A-0", "S1").unwrap().quantity, 3);

        let codes: Vec<_> = repo
            .list_items()
            .into_iter()
            .map(|i| i.location_code)
            .collect();
        assert_eq!(codes, vec!["S0", "S1"]);
    }

    #[test]
    fn add_quantity_overflow_is_an_error() {
        let mut repo = repository();
        repo.add_quantity(Item::new("A-0", "S1", i32::MAX)).unwrap();
        let err = repo.add_quantity(Item::new("A-0", "S1", 1)).unwrap_err();
        assert!(matches!(err, RepositoryError::QuantityOverflow { .. }));
        assert_eq!(
            err.to_string(),
            "Quantity of ProductID [A-0] at [S1] is out of range"
        );
        assert_eq!(repo.find_item("A-0", "S1").unwrap().quantity, i32::MAX);
    }

    #[test]
    fn items_filtered_by_product() {
        let mut repo = repository();
        repo.save_item(Item::new("A-0", "S1", 1)).unwrap();
        repo.save_item(Item::new("B-0", "S1", 2)).unwrap();
        repo.save_item(Item::new("C-0", "S1", 3)).unwrap();
        let found = repo.list_items_for(&["C-0".to_string(), "A-0".to_string()]);
        let ids: Vec<_> = found.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A-0", "C-0"]);
    }
}
