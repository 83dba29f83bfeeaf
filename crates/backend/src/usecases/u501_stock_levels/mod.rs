//! u501: stock levels per product and location
//!
//! `StockManager` sets, adjusts and lists quantities on top of a
//! `StockRepository`. Uploads of `productId,change,location` lines are parsed
//! by `line_parser` before anything is written.

pub mod error;
pub mod line_parser;
pub mod service;

pub use error::StockingError;
pub use service::StockManager;
