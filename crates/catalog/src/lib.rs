//! Catalog domain module.
//!
//! This crate contains the product type whose `stock` figure is the
//! authoritative availability every cart and checkout decision consults.
//! Pure domain logic only (no IO, no HTTP, no storage).

pub mod product;

pub use product::{NewProduct, Product};
