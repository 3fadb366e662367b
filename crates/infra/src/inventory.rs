//! Inventory ledger: the single authority on product stock.
//!
//! Exactly two callers mutate stock: seller/admin edits through
//! [`InventoryLedger::set_stock`], and order placement (consumption plus
//! rollback restore). Cart reconciliation only reads it to clamp and
//! validate.

use std::sync::Arc;

use tracing::instrument;

use brocante_core::{DomainError, Identity, ProductId};

use crate::error::ServiceResult;
use crate::store::{Store, StoreError};

pub struct InventoryLedger {
    store: Arc<dyn Store>,
}

impl InventoryLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Current stock for a product. Unknown or retired products read as sold
    /// out rather than erroring.
    pub fn stock_of(&self, product_id: ProductId) -> Result<u32, StoreError> {
        Ok(self
            .store
            .get_product(product_id)?
            .map(|p| p.stock)
            .unwrap_or(0))
    }

    /// Seller/admin stock edit. Negative requests clamp to zero; returns the
    /// stored stock figure.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id(), product_id = %product_id))]
    pub fn set_stock(
        &self,
        identity: &Identity,
        product_id: ProductId,
        requested: i64,
    ) -> ServiceResult<u32> {
        let product = self
            .store
            .get_product(product_id)?
            .ok_or(DomainError::NotFound)?;

        if !identity.is_admin() && !product.is_owned_by(identity.user_id()) {
            return Err(DomainError::Forbidden.into());
        }

        // Ownership never changes, so the authorization read can precede the
        // atomic write; the edit itself must not clobber a concurrent
        // consumption, so it runs inside the store's critical section.
        let updated = self
            .store
            .update_product(product_id, &|p| p.set_stock(requested))?
            .ok_or(DomainError::NotFound)?;

        tracing::info!(stock = updated.stock, "stock updated");
        Ok(updated.stock)
    }
}
