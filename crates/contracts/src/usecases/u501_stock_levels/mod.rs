pub mod request;

pub use request::StockLevel;

use crate::usecases::common::UseCaseMetadata;

/// Setting, adjusting and reading stock levels per product and location
pub struct StockLevels;

impl UseCaseMetadata for StockLevels {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "stock_levels"
    }

    fn display_name() -> &'static str {
        "Stock levels"
    }

    fn description() -> &'static str {
        "Set, adjust or list product quantities per location"
    }
}
