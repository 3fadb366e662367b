use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brocante_core::{LineItemId, ProductId, UserId};

/// Lifecycle of a line item.
///
/// `Ordered` is the terminal marker applied at checkout: the line leaves the
/// active cart view but is kept for order history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemStatus {
    Cart,
    Wishlist,
    Ordered,
}

impl LineItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemStatus::Cart => "cart",
            LineItemStatus::Wishlist => "wishlist",
            LineItemStatus::Ordered => "ordered",
        }
    }
}

/// The (color, size) pair distinguishing otherwise-identical selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub color: Option<String>,
    pub size: Option<String>,
}

impl Variant {
    pub fn new(color: Option<String>, size: Option<String>) -> Self {
        Self { color, size }
    }
}

/// Uniqueness key for cart/wishlist rows.
///
/// At most one line item exists per key; duplicate adds merge quantities
/// instead of creating parallel rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub variant: Variant,
    pub status: LineItemStatus,
}

/// A cart or wishlist entry for one user/product/variant combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub variant: Variant,
    pub quantity: u32,
    pub status: LineItemStatus,
    /// Price in smallest currency unit, snapshotted when the line was added.
    /// Checkout prices against the live product, not this snapshot.
    pub unit_price: u64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LineItem {
    pub fn key(&self) -> LineKey {
        LineKey {
            user_id: self.user_id,
            product_id: self.product_id,
            variant: self.variant.clone(),
            status: self.status,
        }
    }
}
