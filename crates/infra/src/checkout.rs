//! Order placement: converts a user's cart snapshot into an immutable order.
//!
//! The store cannot guarantee atomic multi-row creation, so placement runs as
//! a logical transaction with compensating rollback: any failure after the
//! order row exists deletes the partial order, restores consumed stock, and
//! reverts already-marked cart lines before surfacing the error.

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use brocante_cart::{LineItem, LineItemStatus};
use brocante_catalog::Product;
use brocante_core::{DomainError, Identity, LineItemId, OrderId, OrderLineItemId, ProductId};
use brocante_orders::{FulfillmentStatus, Order, OrderLineItem, OrderStatus};

use crate::error::ServiceResult;
use crate::store::Store;

/// Typed checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub address: String,
    pub phone_number: String,
    /// Payment method label only; no gateway integration.
    pub payment: String,
    /// When supplied, a repeat submission with the same key returns the
    /// already-placed order instead of creating a duplicate.
    pub idempotency_key: Option<String>,
}

pub struct OrderPlacement {
    store: Arc<dyn Store>,
}

impl OrderPlacement {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Place an order from the caller's current cart.
    ///
    /// Totals and line prices use the **live** product price at this moment,
    /// not the add-time snapshot on the cart line. Ordered quantities are
    /// consumed from stock, and the source cart lines transition to the
    /// terminal `ordered` marker (kept for history, gone from the cart view).
    #[instrument(skip(self, identity, cmd), fields(user_id = %identity.user_id()))]
    pub fn place_order(&self, identity: &Identity, cmd: PlaceOrder) -> ServiceResult<OrderId> {
        if let Some(key) = &cmd.idempotency_key {
            if let Some(existing) = self
                .store
                .find_order_by_idempotency_key(identity.user_id(), key)?
            {
                tracing::info!(order_id = %existing, "idempotent replay, returning existing order");
                return Ok(existing);
            }
        }

        let cart = self
            .store
            .list_lines_by_user(identity.user_id(), LineItemStatus::Cart)?;
        if cart.is_empty() {
            return Err(DomainError::EmptyCart.into());
        }

        // Join with live products up front; catalog products referenced by a
        // cart are never hard-deleted, so a miss here is a real fault.
        let mut resolved: Vec<(LineItem, Product)> = Vec::with_capacity(cart.len());
        for line in cart {
            let product = self
                .store
                .get_product(line.product_id)?
                .ok_or(DomainError::NotFound)?;
            resolved.push((line, product));
        }

        let total: u64 = resolved
            .iter()
            .map(|(line, product)| product.price * u64::from(line.quantity))
            .sum();

        let order = Order {
            id: OrderId::new(),
            user_id: identity.user_id(),
            address: cmd.address,
            phone_number: cmd.phone_number,
            payment: cmd.payment,
            status: OrderStatus::Pending,
            total,
            created_at: Utc::now(),
        };
        let order_id = order.id;
        self.store.insert_order(order)?;

        // Everything past this point compensates on failure.
        let mut consumed: Vec<(ProductId, u32)> = Vec::new();
        let mut marked: Vec<LineItemId> = Vec::new();
        if let Err(err) = self.fill_order(order_id, &resolved, &mut consumed, &mut marked) {
            tracing::warn!(order_id = %order_id, error = %err, "placement failed, rolling back");
            self.rollback(order_id, &consumed, &marked);
            return Err(err);
        }

        if let Some(key) = &cmd.idempotency_key {
            // The order is already durable; a failed key write only weakens
            // replay detection, so log it instead of failing the checkout.
            if let Err(err) = self
                .store
                .record_idempotency_key(identity.user_id(), key, order_id)
            {
                tracing::warn!(order_id = %order_id, error = %err, "idempotency key not recorded");
            }
        }

        tracing::info!(order_id = %order_id, total, "order placed");
        Ok(order_id)
    }

    fn fill_order(
        &self,
        order_id: OrderId,
        resolved: &[(LineItem, Product)],
        consumed: &mut Vec<(ProductId, u32)>,
        marked: &mut Vec<LineItemId>,
    ) -> ServiceResult<()> {
        for (line, product) in resolved {
            let order_line = OrderLineItem {
                id: OrderLineItemId::new(),
                order_id,
                product_id: line.product_id,
                seller_id: product.seller_id,
                quantity: line.quantity,
                unit_price: product.price,
                variant: line.variant.clone(),
                status: FulfillmentStatus::Pending,
            };
            self.store.insert_order_line(order_line)?;
        }

        for (line, _) in resolved {
            // Consumed inside the store's write critical section, not via a
            // separate read and write-back: a seller correction or a sibling
            // placement committing in between must not be overwritten.
            self.store
                .update_product(line.product_id, &|p| p.consume_stock(line.quantity))?
                .ok_or(DomainError::NotFound)?;
            consumed.push((line.product_id, line.quantity));
        }

        for (line, _) in resolved {
            let mut ordered = line.clone();
            ordered.status = LineItemStatus::Ordered;
            self.store.update_line(ordered)?;
            marked.push(line.id);
        }

        Ok(())
    }

    /// Best-effort compensation; individual failures are logged, not surfaced.
    fn rollback(&self, order_id: OrderId, consumed: &[(ProductId, u32)], marked: &[LineItemId]) {
        for line_id in marked {
            match self.store.get_line(*line_id) {
                Ok(Some(mut line)) => {
                    line.status = LineItemStatus::Cart;
                    if let Err(err) = self.store.update_line(line) {
                        tracing::warn!(line_id = %line_id, error = %err, "cart line not reverted");
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(line_id = %line_id, error = %err, "cart line not reverted");
                }
            }
        }

        for (product_id, quantity) in consumed {
            match self
                .store
                .update_product(*product_id, &|p| p.restore_stock(*quantity))
            {
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(product_id = %product_id, error = %err, "stock not restored");
                }
            }
        }

        if let Err(err) = self.store.delete_order(order_id) {
            tracing::warn!(order_id = %order_id, error = %err, "partial order not deleted");
        }
    }

    /// An order visible to its buyer (or an admin), with its lines.
    pub fn get_order(
        &self,
        identity: &Identity,
        order_id: OrderId,
    ) -> ServiceResult<(Order, Vec<OrderLineItem>)> {
        let order = self
            .store
            .get_order(order_id)?
            .ok_or(DomainError::NotFound)?;
        if order.user_id != identity.user_id() && !identity.is_admin() {
            return Err(DomainError::NotFound.into());
        }
        let lines = self.store.order_lines(order_id)?;
        Ok((order, lines))
    }

    /// The caller's orders, newest first.
    pub fn list_orders(&self, identity: &Identity) -> ServiceResult<Vec<Order>> {
        Ok(self.store.list_orders_by_user(identity.user_id())?)
    }
}
