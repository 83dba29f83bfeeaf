pub mod a001_location;
pub mod a002_product;
pub mod a003_item;
pub mod common;
