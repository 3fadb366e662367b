//! Fulfillment lifecycle and aggregate-status derivation.

use serde::{Deserialize, Serialize};

/// Per-line fulfillment state, owned by the line's seller.
///
/// Lines progress `Pending -> Confirmed -> Shipped -> Delivered`;
/// `Cancelled` is reachable from any other state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FulfillmentStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl FulfillmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "PENDING",
            FulfillmentStatus::Confirmed => "CONFIRMED",
            FulfillmentStatus::Shipped => "SHIPPED",
            FulfillmentStatus::Delivered => "DELIVERED",
            FulfillmentStatus::Cancelled => "CANCELLED",
        }
    }

    /// Position on the forward progression ladder. `Cancelled` sits outside it.
    fn stage(self) -> Option<u8> {
        match self {
            FulfillmentStatus::Pending => Some(0),
            FulfillmentStatus::Confirmed => Some(1),
            FulfillmentStatus::Shipped => Some(2),
            FulfillmentStatus::Delivered => Some(3),
            FulfillmentStatus::Cancelled => None,
        }
    }

    /// Whether a seller may move a line from `self` to `next`.
    ///
    /// Forward moves along the ladder are allowed (skipping intermediate
    /// stages included); `Cancelled` is allowed from any other state and is
    /// terminal once reached.
    pub fn can_transition_to(self, next: FulfillmentStatus) -> bool {
        match (self.stage(), next.stage()) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(from), Some(to)) => to > from,
        }
    }
}

/// Aggregate status of an order, derived from its line statuses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Derive an order's aggregate status from all of its line statuses.
///
/// A cancelled line dominates the whole order, even when sibling lines are
/// further along. Otherwise the order reports the furthest stage every line
/// has reached.
pub fn aggregate_status(lines: &[FulfillmentStatus]) -> OrderStatus {
    use FulfillmentStatus as F;

    if lines.iter().any(|s| *s == F::Cancelled) {
        return OrderStatus::Cancelled;
    }
    if lines.is_empty() {
        return OrderStatus::Pending;
    }
    if lines.iter().all(|s| *s == F::Delivered) {
        return OrderStatus::Delivered;
    }
    if lines
        .iter()
        .all(|s| matches!(s, F::Shipped | F::Delivered))
    {
        return OrderStatus::Shipped;
    }
    if lines
        .iter()
        .all(|s| matches!(s, F::Confirmed | F::Shipped | F::Delivered))
    {
        return OrderStatus::Confirmed;
    }
    OrderStatus::Pending
}
