pub mod stock_repository;

pub use stock_repository::{InMemoryStockRepository, RepositoryError, StockRepository};
