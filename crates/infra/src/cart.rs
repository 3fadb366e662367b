//! Cart reconciliation: add/update/merge/move operations that reconcile
//! per-user lines against live product stock.
//!
//! Additive adds clamp to stock silently; explicit quantity edits reject
//! out-of-bound requests. Quantity decisions for anything that can create or
//! merge a row run inside the store's critical section (see
//! [`crate::store::LineItemStore::upsert_line_quantity`]).

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use brocante_cart::{LineItem, LineItemStatus, LineKey, Variant, policy};
use brocante_core::{DomainError, Identity, LineItemId, ProductId};

use crate::error::ServiceResult;
use crate::store::{Store, StoreError};

/// Typed add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub product_id: ProductId,
    pub variant: Variant,
    pub quantity: u32,
    /// `Cart` or `Wishlist`; `Ordered` is not addressable from outside.
    pub status: LineItemStatus,
}

/// One line of an anonymous (pre-login) cart to fold into the user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestLine {
    pub product_id: ProductId,
    pub variant: Variant,
    pub quantity: u32,
    /// Snapshot carried over from the guest session.
    pub unit_price: u64,
    pub image: Option<String>,
}

pub struct CartService {
    store: Arc<dyn Store>,
}

impl CartService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Add a product to the user's cart or wishlist.
    ///
    /// Cart adds clamp the requested quantity to live stock and merge into an
    /// existing line for the same variant; a zero-stock product blocks the add
    /// without writing anything. Wishlist adds never accumulate: a second add
    /// for the same variant returns the existing line unchanged.
    #[instrument(skip(self, identity, cmd), fields(user_id = %identity.user_id(), product_id = %cmd.product_id))]
    pub fn add(&self, identity: &Identity, cmd: AddItem) -> ServiceResult<LineItem> {
        if cmd.status == LineItemStatus::Ordered {
            return Err(
                DomainError::validation("items can only be added to cart or wishlist").into(),
            );
        }

        let product = self
            .store
            .get_product(cmd.product_id)?
            .ok_or(DomainError::NotFound)?;

        let key = LineKey {
            user_id: identity.user_id(),
            product_id: cmd.product_id,
            variant: cmd.variant.clone(),
            status: cmd.status,
        };
        let template = LineItem {
            id: LineItemId::new(),
            user_id: identity.user_id(),
            product_id: cmd.product_id,
            variant: cmd.variant,
            // Placeholder; the store upsert writes the decided quantity.
            quantity: 0,
            status: cmd.status,
            unit_price: product.price,
            image: product.primary_image.clone(),
            created_at: Utc::now(),
        };

        let requested = cmd.quantity;
        let stored = match cmd.status {
            LineItemStatus::Cart => {
                self.store
                    .upsert_line_quantity(&key, &template, &|stock, existing| {
                        let admitted = policy::admit_cart_quantity(stock, requested)?;
                        Ok(match existing {
                            Some(current) => policy::merge_cart_quantity(current, admitted, stock),
                            None => admitted,
                        })
                    })?
            }
            LineItemStatus::Wishlist => {
                self.store
                    .upsert_line_quantity(&key, &template, &|_stock, existing| {
                        if requested == 0 {
                            return Err(DomainError::validation("quantity must be positive"));
                        }
                        // Wishlists never accumulate quantity.
                        Ok(existing.unwrap_or(requested))
                    })?
            }
            LineItemStatus::Ordered => unreachable!("rejected above"),
        };

        Ok(stored?)
    }

    /// Explicit quantity edit on a cart line: strict `[1, stock]` validation,
    /// never clamped.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id(), line_id = %line_id))]
    pub fn set_quantity(
        &self,
        identity: &Identity,
        line_id: LineItemId,
        requested: i64,
    ) -> ServiceResult<LineItem> {
        let line = self.store.get_line(line_id)?.ok_or(DomainError::NotFound)?;

        if line.user_id != identity.user_id() {
            return Err(DomainError::Forbidden.into());
        }
        if line.status != LineItemStatus::Cart {
            return Err(DomainError::validation("only cart lines accept quantity edits").into());
        }

        let stock = self
            .store
            .get_product(line.product_id)?
            .map(|p| p.stock)
            .unwrap_or(0);
        let quantity = policy::validate_explicit_quantity(requested, stock)?;

        let mut updated = line;
        updated.quantity = quantity;
        self.store.update_line(updated.clone())?;
        Ok(updated)
    }

    /// Remove a line the caller owns.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id(), line_id = %line_id))]
    pub fn remove(&self, identity: &Identity, line_id: LineItemId) -> ServiceResult<()> {
        let line = self.store.get_line(line_id)?.ok_or(DomainError::NotFound)?;

        if line.user_id != identity.user_id() {
            return Err(DomainError::Forbidden.into());
        }

        self.store.remove_line(line_id)?;
        Ok(())
    }

    /// Flip a wishlist line into the cart.
    ///
    /// Quantity is carried over as-is; stock is enforced again at the next
    /// quantity edit and at checkout. A non-owned or non-wishlist source is
    /// reported as absent rather than forbidden. When the cart already holds
    /// a line for the same variant the two merge by addition, keeping the
    /// one-row-per-key invariant.
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id(), line_id = %line_id))]
    pub fn move_to_cart(&self, identity: &Identity, line_id: LineItemId) -> ServiceResult<LineItem> {
        let line = self.store.get_line(line_id)?.ok_or(DomainError::NotFound)?;

        if line.user_id != identity.user_id() || line.status != LineItemStatus::Wishlist {
            return Err(DomainError::NotFound.into());
        }

        let cart_key = LineKey {
            user_id: line.user_id,
            product_id: line.product_id,
            variant: line.variant.clone(),
            status: LineItemStatus::Cart,
        };

        match self.store.find_line_by_key(&cart_key)? {
            Some(mut existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
                self.store.update_line(existing.clone())?;
                self.store.remove_line(line.id)?;
                Ok(existing)
            }
            None => {
                let mut moved = line;
                moved.status = LineItemStatus::Cart;
                self.store.update_line(moved.clone())?;
                Ok(moved)
            }
        }
    }

    /// Fold a guest-session cart into the authenticated user's cart on login.
    ///
    /// Processed line-by-line, never as one transaction: a single product's
    /// failure (deleted, sold out) must not block merging the rest. Returns
    /// how many lines were merged; skipped lines are logged and dropped.
    #[instrument(skip(self, identity, lines), fields(user_id = %identity.user_id(), lines = lines.len()))]
    pub fn merge_guest_cart(&self, identity: &Identity, lines: Vec<GuestLine>) -> usize {
        let mut merged = 0;
        for guest in lines {
            match self.merge_guest_line(identity, guest) {
                Ok(()) => merged += 1,
                Err(err) => tracing::debug!(error = %err, "guest cart line skipped"),
            }
        }
        merged
    }

    fn merge_guest_line(&self, identity: &Identity, guest: GuestLine) -> ServiceResult<()> {
        // Products that no longer exist are skipped silently by the caller.
        if self.store.get_product(guest.product_id)?.is_none() {
            return Err(DomainError::NotFound.into());
        }

        let key = LineKey {
            user_id: identity.user_id(),
            product_id: guest.product_id,
            variant: guest.variant.clone(),
            status: LineItemStatus::Cart,
        };
        let template = LineItem {
            id: LineItemId::new(),
            user_id: identity.user_id(),
            product_id: guest.product_id,
            variant: guest.variant,
            quantity: 0,
            status: LineItemStatus::Cart,
            // Guest sessions carry their own add-time snapshot.
            unit_price: guest.unit_price,
            image: guest.image,
            created_at: Utc::now(),
        };

        let requested = guest.quantity;
        self.store
            .upsert_line_quantity(&key, &template, &|stock, existing| {
                let admitted = policy::admit_cart_quantity(stock, requested)?;
                Ok(match existing {
                    Some(current) => policy::merge_cart_quantity(current, admitted, stock),
                    None => admitted,
                })
            })??;
        Ok(())
    }

    /// A user's lines with the given status, ordered by creation.
    pub fn list(
        &self,
        identity: &Identity,
        status: LineItemStatus,
    ) -> Result<Vec<LineItem>, StoreError> {
        self.store.list_lines_by_user(identity.user_id(), status)
    }
}
