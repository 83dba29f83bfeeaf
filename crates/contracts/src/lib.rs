//! Shared record types and the record-identity framework
//!
//! - `shared::metadata`: field roles, per-type metadata and its registry
//! - `shared::identity`: equality, hashing, ordering, rendering, validation
//! - `domain`: the stock records (`Location`, `Product`, `Item`)
//! - `usecases`: transfer types for the stock-level use case

pub mod domain;
pub mod shared;
pub mod usecases;
