use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio::sync::broadcast;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use brocante_core::UserId;
use brocante_infra::{
    cart::CartService,
    catalog::CatalogService,
    checkout::OrderPlacement,
    fulfillment::FulfillmentService,
    inventory::InventoryLedger,
    store::{InMemoryStore, Store},
};

/// Cart-change notification broadcast via SSE.
///
/// Lets other tabs/devices of the same user refresh their cart view; the
/// payload is a hint to re-fetch, not a data carrier.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CartChangedMessage {
    pub user_id: UserId,
    pub topic: String,
}

/// Shared service bundle handed to every handler.
pub struct AppServices {
    pub catalog: CatalogService,
    pub inventory: InventoryLedger,
    pub cart: CartService,
    pub placement: OrderPlacement,
    pub fulfillment: FulfillmentService,
    realtime_tx: broadcast::Sender<CartChangedMessage>,
}

impl AppServices {
    /// Broadcast that a user's cart changed (lossy; no backpressure on the
    /// request path).
    pub fn notify_cart_changed(&self, user_id: UserId, topic: &str) {
        let _ = self.realtime_tx.send(CartChangedMessage {
            user_id,
            topic: topic.to_string(),
        });
    }
}

/// Wire the store and the services on top of it.
pub fn build_services() -> AppServices {
    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    let (realtime_tx, _) = broadcast::channel(256);

    AppServices {
        catalog: CatalogService::new(store.clone()),
        inventory: InventoryLedger::new(store.clone()),
        cart: CartService::new(store.clone()),
        placement: OrderPlacement::new(store.clone()),
        fulfillment: FulfillmentService::new(store),
        realtime_tx,
    }
}

/// SSE stream of cart-change notifications for one user.
pub fn cart_sse_stream(
    services: Arc<AppServices>,
    user_id: UserId,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.realtime_tx.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |msg| match msg {
        Ok(msg) if msg.user_id == user_id => {
            let data = serde_json::to_string(&msg).unwrap_or_default();
            Some(Ok(SseEvent::default().event("cart").data(data)))
        }
        // Other users' messages and lagged-receiver gaps are dropped;
        // clients re-fetch on the next event anyway.
        _ => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
