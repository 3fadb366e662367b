//! Cart/wishlist domain module.
//!
//! Line-item types plus the pure reconciliation policies that decide how a
//! requested quantity is admitted, clamped, and merged against live stock.
//! No IO, no HTTP, no storage; the stateful service in the infra layer
//! applies these decisions against a backing store.

pub mod line_item;
pub mod policy;

pub use line_item::{LineItem, LineItemStatus, LineKey, Variant};
