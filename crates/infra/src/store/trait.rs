use thiserror::Error;

use brocante_cart::{LineItem, LineItemStatus, LineKey};
use brocante_catalog::Product;
use brocante_core::{DomainResult, LineItemId, OrderId, OrderLineItemId, ProductId, UserId};
use brocante_orders::{FulfillmentStatus, Order, OrderLineItem, OrderStatus};

/// Error from a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transient backing-store failure (lock poisoned, connection lost, ...).
    #[error("storage failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Product storage.
pub trait ProductStore: Send + Sync {
    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert or replace a product row.
    fn upsert_product(&self, product: Product) -> Result<(), StoreError>;

    /// Mutate the product for `id` with `apply` **inside the store's write
    /// critical section**, so a read-modify-write (stock consumption, a
    /// seller correction) can never overwrite a write that committed in
    /// between. Returns the updated product, or `None` when absent.
    fn update_product(
        &self,
        id: ProductId,
        apply: &dyn Fn(&mut Product),
    ) -> Result<Option<Product>, StoreError>;
}

/// Cart/wishlist line storage.
///
/// Uniqueness invariant: at most one line per [`LineKey`]. Callers go through
/// [`LineItemStore::upsert_line_quantity`] for anything that could create a
/// row, so duplicate adds merge instead of forking.
pub trait LineItemStore: Send + Sync {
    fn get_line(&self, id: LineItemId) -> Result<Option<LineItem>, StoreError>;

    fn find_line_by_key(&self, key: &LineKey) -> Result<Option<LineItem>, StoreError>;

    /// Insert-or-merge the line for `key`, deciding the stored quantity with
    /// `decide(stock, existing_quantity)` **inside the store's write critical
    /// section** so the decision sees commit-time stock rather than
    /// request-start stock.
    ///
    /// When `decide` returns a domain error nothing is written; when no line
    /// exists for `key`, `template` is inserted with the decided quantity.
    fn upsert_line_quantity(
        &self,
        key: &LineKey,
        template: &LineItem,
        decide: &dyn Fn(u32, Option<u32>) -> DomainResult<u32>,
    ) -> Result<DomainResult<LineItem>, StoreError>;

    /// Replace an existing line row (matched by id).
    fn update_line(&self, line: LineItem) -> Result<(), StoreError>;

    fn remove_line(&self, id: LineItemId) -> Result<(), StoreError>;

    /// A user's lines with the given status, ordered by creation.
    fn list_lines_by_user(
        &self,
        user_id: UserId,
        status: LineItemStatus,
    ) -> Result<Vec<LineItem>, StoreError>;
}

/// Order and order-line storage.
///
/// Multi-row creation is not atomic here; the placement workflow compensates
/// with [`OrderStore::delete_order`] when a later write fails.
pub trait OrderStore: Send + Sync {
    fn insert_order(&self, order: Order) -> Result<(), StoreError>;

    fn insert_order_line(&self, line: OrderLineItem) -> Result<(), StoreError>;

    fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    fn get_order_line(&self, id: OrderLineItemId) -> Result<Option<OrderLineItem>, StoreError>;

    /// All lines of an order, ordered by creation.
    fn order_lines(&self, id: OrderId) -> Result<Vec<OrderLineItem>, StoreError>;

    fn set_order_line_status(
        &self,
        id: OrderLineItemId,
        status: FulfillmentStatus,
    ) -> Result<(), StoreError>;

    fn set_order_status(&self, id: OrderId, status: OrderStatus) -> Result<(), StoreError>;

    /// Remove an order and all of its lines. Used by compensating rollback;
    /// removing an absent order is not an error.
    fn delete_order(&self, id: OrderId) -> Result<(), StoreError>;

    /// A user's orders, newest first.
    fn list_orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError>;

    /// Idempotent checkout support: the order previously recorded for this
    /// (user, key) pair, if any.
    fn find_order_by_idempotency_key(
        &self,
        user_id: UserId,
        key: &str,
    ) -> Result<Option<OrderId>, StoreError>;

    fn record_idempotency_key(
        &self,
        user_id: UserId,
        key: &str,
        order_id: OrderId,
    ) -> Result<(), StoreError>;
}

/// Combined storage facade the services operate on.
pub trait Store: ProductStore + LineItemStore + OrderStore {}

impl<T: ProductStore + LineItemStore + OrderStore> Store for T {}
