use contracts::usecases::common::{UseCaseError, UseCaseMetadata};
use contracts::usecases::u501_stock_levels::StockLevels;
use thiserror::Error;

use crate::shared::data::RepositoryError;

#[derive(Debug, Error)]
pub enum StockingError {
    #[error("ProductID [{0}] is missing product name value")]
    MissingProductName(String),

    #[error("ProductID [{0}] is invalid")]
    UnknownProduct(String),

    #[error("[Line#{line}] line formatting is invalid [{content}]")]
    LineFormat { line: usize, content: String },

    #[error("[Line#{line}] quantity [{value}] is invalid [{content}]")]
    InvalidQuantity {
        line: usize,
        value: String,
        content: String,
    },

    #[error("Failed to read stock upload: {0}")]
    Upload(#[from] csv::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<StockingError> for UseCaseError {
    fn from(err: StockingError) -> Self {
        let code = match &err {
            StockingError::Upload(_) => "INTERNAL_ERROR",
            _ => "VALIDATION_ERROR",
        };
        UseCaseError::new(code, err.to_string()).with_details(StockLevels::full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_usecase_error() {
        let err: UseCaseError = StockingError::UnknownProduct("Z-9".into()).into();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.message, "ProductID [Z-9] is invalid");
        assert_eq!(err.details.as_deref(), Some("u501_stock_levels"));
    }
}
