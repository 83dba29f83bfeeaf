pub mod common;
pub mod u501_stock_levels;
