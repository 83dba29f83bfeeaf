pub mod identity;
pub mod metadata;
