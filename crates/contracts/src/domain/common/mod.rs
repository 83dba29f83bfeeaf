//! Common types and traits for all records

pub mod record;

// Re-exports
pub use record::{FieldSource, Record};
