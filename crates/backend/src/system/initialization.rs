//! Startup steps run before the stock manager takes requests

use std::sync::Arc;

use contracts::domain::a001_location::Location;
use contracts::domain::a002_product::Product;
use contracts::domain::a003_item::Item;
use contracts::shared::identity::IdentityEngine;
use contracts::shared::metadata::{MetadataError, MetadataRegistry};

use crate::shared::config::Config;
use crate::shared::data::{RepositoryError, StockRepository};

/// Build the identity engine with every record type registered up front
///
/// A record type with broken field declarations stops startup here instead
/// of surfacing later as diagnostics.
pub fn initialize_identity() -> Result<IdentityEngine, MetadataError> {
    let registry = Arc::new(MetadataRegistry::new());
    registry.register::<Location>()?;
    registry.register::<Product>()?;
    registry.register::<Item>()?;
    tracing::info!("Record metadata registered: {} types", registry.len());
    Ok(IdentityEngine::new(registry))
}

/// Create the locations listed in the configuration
pub fn seed_locations<R: StockRepository>(
    repository: &mut R,
    config: &Config,
) -> Result<usize, RepositoryError> {
    for location in &config.stock.locations {
        repository.save_location(Location::new(location.code.clone(), location.name.clone()))?;
    }
    tracing::info!("Seeded {} locations", config.stock.locations.len());
    Ok(config.stock.locations.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::{LocationConfig, StockConfig};
    use crate::shared::data::InMemoryStockRepository;

    #[test]
    fn registers_all_record_types() {
        let engine = initialize_identity().unwrap();
        assert_eq!(engine.registry().len(), 3);
        assert!(engine.registry().contains::<Item>());
    }

    #[test]
    fn seeds_configured_locations_in_code_order() {
        let config = Config {
            stock: StockConfig {
                locations: vec![
                    LocationConfig {
                        code: "S2".into(),
                        name: "Store 2".into(),
                    },
                    LocationConfig {
                        code: "S0".into(),
                        name: "Store 0".into(),
                    },
                ],
                upload_file: None,
            },
        };
        let mut repo = InMemoryStockRepository::new(initialize_identity().unwrap());
        assert_eq!(seed_locations(&mut repo, &config).unwrap(), 2);
        let codes: Vec<_> = repo.list_locations().into_iter().map(|l| l.code).collect();
        assert_eq!(codes, vec!["S0", "S2"]);
    }
}
