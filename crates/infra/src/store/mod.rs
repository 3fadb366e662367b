//! Storage boundary for the cart/order core.
//!
//! This module defines infrastructure-facing abstractions for the three
//! persisted families (products, cart/wishlist lines, orders) without making
//! any storage assumptions. The in-memory backend is the default runtime
//! store and the test substrate.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use r#trait::{LineItemStore, OrderStore, ProductStore, Store, StoreError};
