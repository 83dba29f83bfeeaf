//! Stock level operations with all-or-nothing writes

use std::collections::HashMap;

use contracts::domain::a002_product::Product;
use contracts::domain::a003_item::Item;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_stock_levels::{StockLevel, StockLevels};

use super::error::StockingError;
use super::line_parser;
use crate::shared::data::StockRepository;

/// Product name reported for items whose product is unknown
const MISSING_PRODUCT_NAME: &str = "missing";

/// Sets, adjusts and reads stock levels
///
/// Every write operation is all-or-nothing: changes go to a staged copy of
/// the repository that replaces the live one only when the whole batch
/// succeeded.
pub struct StockManager<R> {
    repository: R,
}

impl<R: StockRepository + Clone> StockManager<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    fn in_transaction<T>(
        &mut self,
        work: impl FnOnce(&mut R) -> Result<T, StockingError>,
    ) -> Result<T, StockingError> {
        let mut staged = self.repository.clone();
        match work(&mut staged) {
            Ok(value) => {
                self.repository = staged;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("{} rolled back: {}", StockLevels::full_name(), err);
                Err(err)
            }
        }
    }

    fn product_names(repository: &R) -> HashMap<String, String> {
        repository
            .list_products()
            .into_iter()
            .map(|product| (product.id, product.name))
            .collect()
    }

    /// Overwrite quantities, creating products that do not exist yet
    pub fn set_stock_levels(&mut self, levels: &[StockLevel]) -> Result<(), StockingError> {
        self.in_transaction(|repo| {
            let products = Self::product_names(repo);
            for level in levels {
                if !products.contains_key(&level.product_id) {
                    let name = level
                        .product_name
                        .as_deref()
                        .ok_or_else(|| StockingError::MissingProductName(level.product_id.clone()))?;
                    repo.save_product(Product::new(level.product_id.clone(), name))?;
                }
                repo.save_item(level.to_item())?;
            }
            tracing::info!("Stock levels set: {} entries", levels.len());
            Ok(())
        })
    }

    /// Add quantity changes to existing products
    pub fn update_stock_levels(&mut self, levels: &[StockLevel]) -> Result<(), StockingError> {
        self.in_transaction(|repo| {
            let products = Self::product_names(repo);
            for level in levels {
                if !products.contains_key(&level.product_id) {
                    return Err(StockingError::UnknownProduct(level.product_id.clone()));
                }
                repo.add_quantity(level.to_item())?;
            }
            tracing::info!("Stock levels updated: {} entries", levels.len());
            Ok(())
        })
    }

    /// Apply an upload of `productId,change,location` lines
    ///
    /// Returns the number of lines processed. Nothing is applied unless every
    /// line parses.
    pub fn update_stock_levels_from_lines(&mut self, text: &str) -> Result<usize, StockingError> {
        let items = line_parser::parse_lines(text)?;
        self.in_transaction(|repo| {
            for item in &items {
                repo.add_quantity(item.clone())?;
            }
            Ok(items.len())
        })
    }

    pub fn get_stock_levels(&self) -> Vec<StockLevel> {
        self.to_levels(self.repository.list_items())
    }

    pub fn get_stock_levels_for(&self, product_ids: &[String]) -> Vec<StockLevel> {
        self.to_levels(self.repository.list_items_for(product_ids))
    }

    fn to_levels(&self, items: Vec<Item>) -> Vec<StockLevel> {
        let products = Self::product_names(&self.repository);
        items
            .into_iter()
            .map(|item| {
                let name = products
                    .get(&item.product_id)
                    .cloned()
                    .unwrap_or_else(|| MISSING_PRODUCT_NAME.to_string());
                StockLevel::new(item.product_id, Some(name), item.location_code, item.quantity)
            })
            .collect()
    }
}
