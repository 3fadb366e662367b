//! Fulfillment synchronizer: per-line seller updates plus aggregate
//! derivation.
//!
//! Sellers in a multi-seller order govern their own lines independently;
//! after every single-line update the parent order's status is recomputed
//! from all lines.

use std::sync::Arc;

use tracing::instrument;

use brocante_core::{DomainError, Identity, OrderLineItemId};
use brocante_orders::{FulfillmentStatus, OrderStatus, aggregate_status};

use crate::error::ServiceResult;
use crate::store::Store;

pub struct FulfillmentService {
    store: Arc<dyn Store>,
}

impl FulfillmentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Move one order line along its fulfillment lifecycle and return the
    /// recomputed aggregate status of the parent order.
    ///
    /// Only the seller owning the line may update it.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id(), line_id = %line_id))]
    pub fn update_line_status(
        &self,
        identity: &Identity,
        line_id: OrderLineItemId,
        next: FulfillmentStatus,
    ) -> ServiceResult<OrderStatus> {
        let line = self
            .store
            .get_order_line(line_id)?
            .ok_or(DomainError::NotFound)?;

        if line.seller_id != identity.user_id() {
            return Err(DomainError::Forbidden.into());
        }
        if !line.status.can_transition_to(next) {
            return Err(DomainError::invalid_status(format!(
                "{} -> {}",
                line.status.as_str(),
                next.as_str()
            ))
            .into());
        }

        self.store.set_order_line_status(line_id, next)?;

        let statuses: Vec<FulfillmentStatus> = self
            .store
            .order_lines(line.order_id)?
            .iter()
            .map(|l| l.status)
            .collect();
        let aggregate = aggregate_status(&statuses);
        self.store.set_order_status(line.order_id, aggregate)?;

        tracing::info!(
            order_id = %line.order_id,
            line_status = next.as_str(),
            order_status = aggregate.as_str(),
            "fulfillment updated"
        );
        Ok(aggregate)
    }
}
