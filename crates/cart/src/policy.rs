//! Cart reconciliation policies.
//!
//! Pure quantity decisions against live stock. Additive adds clamp silently
//! to stock; explicit quantity edits validate strictly against `[1, stock]`
//! and reject. The asymmetry is intentional: an edit is an exact user choice,
//! an add is optimistic.

use brocante_core::{DomainError, DomainResult};

/// Quantity admitted for a cart add.
///
/// Zero stock blocks the add entirely; otherwise the request is clamped to
/// stock rather than rejected.
pub fn admit_cart_quantity(stock: u32, requested: u32) -> DomainResult<u32> {
    if stock == 0 {
        return Err(DomainError::OutOfStock);
    }
    if requested == 0 {
        return Err(DomainError::validation("quantity must be positive"));
    }
    Ok(requested.min(stock))
}

/// Merged quantity when an add lands on an existing cart line: merge by
/// addition, re-clamped to stock.
pub fn merge_cart_quantity(existing: u32, incoming: u32, stock: u32) -> u32 {
    existing.saturating_add(incoming).min(stock)
}

/// Strict bound for an explicit quantity edit: `1 <= requested <= stock`.
pub fn validate_explicit_quantity(requested: i64, stock: u32) -> DomainResult<u32> {
    if requested < 1 || requested > i64::from(stock) {
        return Err(DomainError::InvalidQuantity {
            requested,
            available: stock,
        });
    }
    // Bounds checked above; stock is u32 so the cast cannot truncate.
    Ok(requested as u32)
}
