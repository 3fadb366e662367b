//! Infrastructure layer: storage backends and the stateful services that
//! drive the cart/order workflows against them.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod fulfillment;
pub mod inventory;
pub mod store;


pub use error::{ServiceError, ServiceResult};
