//! Stock service entry point
//!
//! Registers record metadata, seeds the configured locations, applies the
//! configured upload and logs the resulting stock levels.

pub mod shared;
pub mod system;
pub mod usecases;

use anyhow::Context;
use shared::data::InMemoryStockRepository;
use usecases::u501_stock_levels::StockManager;

fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;
    tracing::info!("Stock service starting");

    let config = shared::config::load_config().context("Failed to load configuration")?;

    let engine = system::initialization::initialize_identity()
        .context("Record metadata declarations are invalid")?;

    let mut manager = StockManager::new(InMemoryStockRepository::new(engine));
    system::initialization::seed_locations(manager.repository_mut(), &config)?;

    if let Some(path) = shared::config::get_upload_path(&config) {
        tracing::info!("Applying stock upload: {}", path.display());
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read stock upload {}", path.display()))?;
        match manager.update_stock_levels_from_lines(&text) {
            Ok(count) => tracing::info!("Success with {} lines processed", count),
            Err(e) => tracing::error!("Stock upload rejected: {}", e),
        }
    }

    let levels = manager.get_stock_levels();
    tracing::info!("Stock levels: {} entries", levels.len());
    for level in &levels {
        tracing::info!(
            "{} ({}) @ {}: {}",
            level.product_id,
            level.product_name.as_deref().unwrap_or_default(),
            level.location_code,
            level.quantity
        );
    }

    Ok(())
}
