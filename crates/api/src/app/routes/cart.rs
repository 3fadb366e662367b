//! Cart and wishlist routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, sse::Event as SseEvent},
    routing::{delete, get, post, put},
};
use serde::Deserialize;

use brocante_cart::{LineItemStatus, Variant};
use brocante_core::{LineItemId, ProductId};
use brocante_infra::cart::{AddItem, GuestLine};

use crate::app::dto::{self, AddItemRequest, MergeCartRequest, UpdateQuantityRequest};
use crate::app::services::{self, AppServices};
use crate::app::{errors, routes::common::parse_id};
use crate::context::IdentityContext;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

pub fn router() -> Router {
    Router::new()
        .route("/items", post(add_item).get(list_items))
        .route("/items/:id/quantity", put(set_quantity))
        .route("/items/:id", delete(remove_item))
        .route("/items/:id/move-to-cart", post(move_to_cart))
        .route("/merge", post(merge_guest_cart))
        .route("/stream", get(stream))
}

/// POST /cart/items - add a product to the cart or wishlist
pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<AddItemRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match parse_id(&body.product_id, "invalid product id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let status = match body.status.as_deref() {
        None => LineItemStatus::Cart,
        Some(s) => match errors::parse_line_status(s) {
            Ok(v) => v,
            Err(resp) => return resp,
        },
    };

    let cmd = AddItem {
        product_id,
        variant: Variant::new(body.color, body.size),
        quantity: body.quantity,
        status,
    };

    let line = match services.cart.add(&identity.identity(), cmd) {
        Ok(l) => l,
        Err(e) => return errors::service_error_to_response(e),
    };

    services.notify_cart_changed(identity.user_id(), "item_added");
    (StatusCode::CREATED, Json(dto::line_item_json(&line))).into_response()
}

/// GET /cart/items?status=cart|wishlist - list the caller's lines
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Query(query): Query<ListQuery>,
) -> axum::response::Response {
    let status = match query.status.as_deref() {
        None => LineItemStatus::Cart,
        Some(s) => match errors::parse_line_status(s) {
            Ok(v) => v,
            Err(resp) => return resp,
        },
    };

    let lines = match services.cart.list(&identity.identity(), status) {
        Ok(l) => l,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_failure",
                e.to_string(),
            );
        }
    };

    let items: Vec<_> = lines.iter().map(dto::line_item_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// PUT /cart/items/:id/quantity - explicit quantity edit (strict, never clamped)
pub async fn set_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuantityRequest>,
) -> axum::response::Response {
    let line_id: LineItemId = match parse_id(&id, "invalid line item id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let line = match services
        .cart
        .set_quantity(&identity.identity(), line_id, body.quantity)
    {
        Ok(l) => l,
        Err(e) => return errors::service_error_to_response(e),
    };

    services.notify_cart_changed(identity.user_id(), "quantity_changed");
    (StatusCode::OK, Json(dto::line_item_json(&line))).into_response()
}

/// DELETE /cart/items/:id - remove a line the caller owns
pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let line_id: LineItemId = match parse_id(&id, "invalid line item id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if let Err(e) = services.cart.remove(&identity.identity(), line_id) {
        return errors::service_error_to_response(e);
    }

    services.notify_cart_changed(identity.user_id(), "item_removed");
    StatusCode::NO_CONTENT.into_response()
}

/// POST /cart/items/:id/move-to-cart - flip a wishlist line into the cart
pub async fn move_to_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let line_id: LineItemId = match parse_id(&id, "invalid line item id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let line = match services.cart.move_to_cart(&identity.identity(), line_id) {
        Ok(l) => l,
        Err(e) => return errors::service_error_to_response(e),
    };

    services.notify_cart_changed(identity.user_id(), "moved_to_cart");
    (StatusCode::OK, Json(dto::line_item_json(&line))).into_response()
}

/// POST /cart/merge - fold a guest cart into the caller's cart (best effort)
pub async fn merge_guest_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<MergeCartRequest>,
) -> axum::response::Response {
    let mut lines = Vec::with_capacity(body.lines.len());
    for guest in body.lines {
        let product_id: ProductId = match parse_id(&guest.product_id, "invalid product id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        lines.push(GuestLine {
            product_id,
            variant: Variant::new(guest.color, guest.size),
            quantity: guest.quantity,
            unit_price: guest.price,
            image: guest.image,
        });
    }

    let merged = services.cart.merge_guest_cart(&identity.identity(), lines);

    if merged > 0 {
        services.notify_cart_changed(identity.user_id(), "guest_cart_merged");
    }
    (StatusCode::OK, Json(serde_json::json!({ "merged": merged }))).into_response()
}

/// GET /cart/stream - SSE cart-change notifications for the caller
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
) -> axum::response::Sse<impl tokio_stream::Stream<Item = Result<SseEvent, std::convert::Infallible>>>
{
    services::cart_sse_stream(services, identity.user_id())
}
