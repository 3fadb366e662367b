//! `brocante-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod identity;

pub use error::{DomainError, DomainResult};
pub use id::{LineItemId, OrderId, OrderLineItemId, ProductId, UserId};
pub use identity::{Identity, Role};
