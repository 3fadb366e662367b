use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brocante_core::{DomainError, DomainResult, ProductId, UserId};

/// Attributes supplied by a seller when listing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub stock: u32,
    pub colors: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub primary_image: Option<String>,
}

/// A sellable catalog product.
///
/// `stock` is non-negative by construction and is only mutated through
/// [`Product::set_stock`] (seller edits) and [`Product::consume_stock`] /
/// [`Product::restore_stock`] (order placement and its rollback). Products
/// referenced by orders are never hard-deleted; sellers retire them by
/// setting stock to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub seller_id: UserId,
    pub title: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub stock: u32,
    /// Variant dimensions a line item may select from.
    pub colors: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn create(
        id: ProductId,
        seller_id: UserId,
        attrs: NewProduct,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if attrs.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }

        Ok(Self {
            id,
            seller_id,
            title: attrs.title,
            price: attrs.price,
            stock: attrs.stock,
            colors: attrs.colors,
            sizes: attrs.sizes,
            primary_image: attrs.primary_image,
            created_at,
        })
    }

    /// Apply a seller stock edit. Negative requests clamp to zero.
    pub fn set_stock(&mut self, requested: i64) {
        self.stock = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);
    }

    /// Reduce stock by an ordered quantity, saturating at zero.
    pub fn consume_stock(&mut self, quantity: u32) {
        self.stock = self.stock.saturating_sub(quantity);
    }

    /// Give back stock consumed by a rolled-back order.
    pub fn restore_stock(&mut self, quantity: u32) {
        self.stock = self.stock.saturating_add(quantity);
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.seller_id == user_id
    }
}
