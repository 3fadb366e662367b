//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, authorization). Storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Entity absent, or not visible to the caller.
    #[error("not found")]
    NotFound,

    /// Authenticated but not authorized for this entity.
    #[error("forbidden")]
    Forbidden,

    /// Zero availability blocks creating a cart line.
    #[error("out of stock")]
    OutOfStock,

    /// Explicit quantity request outside the `[1, stock]` bound.
    #[error("invalid quantity {requested}: must be between 1 and {available}")]
    InvalidQuantity { requested: i64, available: u32 },

    /// Checkout attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Fulfillment transition not allowed from the current state.
    #[error("invalid status transition: {0}")]
    InvalidStatus(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_status(msg: impl Into<String>) -> Self {
        Self::InvalidStatus(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
