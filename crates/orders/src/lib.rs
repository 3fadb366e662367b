//! Orders domain module.
//!
//! Order and order-line types, the per-line fulfillment lifecycle, and the
//! pure aggregate-status derivation that synchronizes an order with its
//! independently-updated lines. No IO, no HTTP, no storage.

pub mod order;
pub mod status;

pub use order::{Order, OrderLineItem};
pub use status::{FulfillmentStatus, OrderStatus, aggregate_status};
