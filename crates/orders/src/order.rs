use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brocante_cart::Variant;
use brocante_core::{OrderId, OrderLineItemId, ProductId, UserId};

use crate::status::{FulfillmentStatus, OrderStatus};

/// A placed order.
///
/// Immutable after creation except for `status`, which is recomputed from
/// the line statuses whenever a seller updates one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address: String,
    pub phone_number: String,
    /// Payment method label only; no gateway integration.
    pub payment: String,
    pub status: OrderStatus,
    /// Sum of line totals in smallest currency unit, priced live at placement.
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

/// One line of a placed order.
///
/// Quantity and price are snapshots frozen at placement; only `status` is
/// mutable afterwards, and only by the owning seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: OrderLineItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Owner of the product at order time.
    pub seller_id: UserId,
    pub quantity: u32,
    /// Price in smallest currency unit, snapshotted at placement.
    pub unit_price: u64,
    pub variant: Variant,
    pub status: FulfillmentStatus,
}

impl OrderLineItem {
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_price_times_quantity() {
        let line = OrderLineItem {
            id: OrderLineItemId::new(),
            order_id: OrderId::new(),
            product_id: ProductId::new(),
            seller_id: UserId::new(),
            quantity: 3,
            unit_price: 1_200,
            variant: Variant::default(),
            status: FulfillmentStatus::Pending,
        };
        assert_eq!(line.line_total(), 3_600);
    }
}
