use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use brocante_cart::{LineItem, LineItemStatus, LineKey};
use brocante_catalog::Product;
use brocante_core::{DomainResult, LineItemId, OrderId, OrderLineItemId, ProductId, UserId};
use brocante_orders::{FulfillmentStatus, Order, OrderLineItem, OrderStatus};

use super::r#trait::{LineItemStore, OrderStore, ProductStore, StoreError};

#[derive(Debug, Default)]
struct Db {
    products: HashMap<ProductId, Product>,
    lines: HashMap<LineItemId, LineItem>,
    orders: HashMap<OrderId, Order>,
    order_lines: HashMap<OrderLineItemId, OrderLineItem>,
    idempotency: HashMap<(UserId, String), OrderId>,
}

impl Db {
    // Linear scan; fine for the in-memory backend.
    fn line_id_for_key(&self, key: &LineKey) -> Option<LineItemId> {
        self.lines
            .values()
            .find(|line| line.key() == *key)
            .map(|line| line.id)
    }
}

/// In-memory store backing all three persisted families under one lock.
///
/// Holding products and lines behind the same `RwLock` is what lets
/// `upsert_line_quantity` evaluate its quantity decision against commit-time
/// stock. Intended for tests/dev and single-process deployments; not
/// optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Db>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Db>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Db>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

impl ProductStore for InMemoryStore {
    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn upsert_product(&self, product: Product) -> Result<(), StoreError> {
        self.write()?.products.insert(product.id, product);
        Ok(())
    }

    fn update_product(
        &self,
        id: ProductId,
        apply: &dyn Fn(&mut Product),
    ) -> Result<Option<Product>, StoreError> {
        let mut db = self.write()?;
        Ok(db.products.get_mut(&id).map(|product| {
            apply(product);
            product.clone()
        }))
    }
}

impl LineItemStore for InMemoryStore {
    fn get_line(&self, id: LineItemId) -> Result<Option<LineItem>, StoreError> {
        Ok(self.read()?.lines.get(&id).cloned())
    }

    fn find_line_by_key(&self, key: &LineKey) -> Result<Option<LineItem>, StoreError> {
        let db = self.read()?;
        Ok(db.line_id_for_key(key).and_then(|id| db.lines.get(&id).cloned()))
    }

    fn upsert_line_quantity(
        &self,
        key: &LineKey,
        template: &LineItem,
        decide: &dyn Fn(u32, Option<u32>) -> DomainResult<u32>,
    ) -> Result<DomainResult<LineItem>, StoreError> {
        let mut db = self.write()?;

        // Stock read and quantity write happen under the same write guard, so
        // the decision sees the stock value at commit time.
        let stock = db
            .products
            .get(&key.product_id)
            .map(|p| p.stock)
            .unwrap_or(0);

        match db.line_id_for_key(key) {
            Some(id) => {
                let existing = db.lines.get(&id).map(|l| l.quantity);
                match decide(stock, existing) {
                    Err(e) => Ok(Err(e)),
                    Ok(quantity) => {
                        let line = db
                            .lines
                            .get_mut(&id)
                            .ok_or_else(|| StoreError::backend("line vanished mid-upsert"))?;
                        line.quantity = quantity;
                        Ok(Ok(line.clone()))
                    }
                }
            }
            None => match decide(stock, None) {
                Err(e) => Ok(Err(e)),
                Ok(quantity) => {
                    let mut line = template.clone();
                    line.quantity = quantity;
                    db.lines.insert(line.id, line.clone());
                    Ok(Ok(line))
                }
            },
        }
    }

    fn update_line(&self, line: LineItem) -> Result<(), StoreError> {
        self.write()?.lines.insert(line.id, line);
        Ok(())
    }

    fn remove_line(&self, id: LineItemId) -> Result<(), StoreError> {
        self.write()?.lines.remove(&id);
        Ok(())
    }

    fn list_lines_by_user(
        &self,
        user_id: UserId,
        status: LineItemStatus,
    ) -> Result<Vec<LineItem>, StoreError> {
        let db = self.read()?;
        let mut lines: Vec<LineItem> = db
            .lines
            .values()
            .filter(|l| l.user_id == user_id && l.status == status)
            .cloned()
            .collect();
        lines.sort_by_key(|l| (l.created_at, *l.id.as_uuid()));
        Ok(lines)
    }
}

impl OrderStore for InMemoryStore {
    fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.write()?.orders.insert(order.id, order);
        Ok(())
    }

    fn insert_order_line(&self, line: OrderLineItem) -> Result<(), StoreError> {
        self.write()?.order_lines.insert(line.id, line);
        Ok(())
    }

    fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    fn get_order_line(&self, id: OrderLineItemId) -> Result<Option<OrderLineItem>, StoreError> {
        Ok(self.read()?.order_lines.get(&id).cloned())
    }

    fn order_lines(&self, id: OrderId) -> Result<Vec<OrderLineItem>, StoreError> {
        let db = self.read()?;
        let mut lines: Vec<OrderLineItem> = db
            .order_lines
            .values()
            .filter(|l| l.order_id == id)
            .cloned()
            .collect();
        lines.sort_by_key(|l| *l.id.as_uuid());
        Ok(lines)
    }

    fn set_order_line_status(
        &self,
        id: OrderLineItemId,
        status: FulfillmentStatus,
    ) -> Result<(), StoreError> {
        let mut db = self.write()?;
        if let Some(line) = db.order_lines.get_mut(&id) {
            line.status = status;
        }
        Ok(())
    }

    fn set_order_status(&self, id: OrderId, status: OrderStatus) -> Result<(), StoreError> {
        let mut db = self.write()?;
        if let Some(order) = db.orders.get_mut(&id) {
            order.status = status;
        }
        Ok(())
    }

    fn delete_order(&self, id: OrderId) -> Result<(), StoreError> {
        let mut db = self.write()?;
        db.orders.remove(&id);
        db.order_lines.retain(|_, l| l.order_id != id);
        db.idempotency.retain(|_, order_id| *order_id != id);
        Ok(())
    }

    fn list_orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        let db = self.read()?;
        let mut orders: Vec<Order> = db
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| std::cmp::Reverse((o.created_at, *o.id.as_uuid())));
        Ok(orders)
    }

    fn find_order_by_idempotency_key(
        &self,
        user_id: UserId,
        key: &str,
    ) -> Result<Option<OrderId>, StoreError> {
        Ok(self
            .read()?
            .idempotency
            .get(&(user_id, key.to_string()))
            .copied())
    }

    fn record_idempotency_key(
        &self,
        user_id: UserId,
        key: &str,
        order_id: OrderId,
    ) -> Result<(), StoreError> {
        self.write()?
            .idempotency
            .insert((user_id, key.to_string()), order_id);
        Ok(())
    }
}
