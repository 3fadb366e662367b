//! Order placement and fulfillment routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use brocante_core::{OrderId, OrderLineItemId};
use brocante_infra::checkout::PlaceOrder;

use crate::app::dto::{self, PlaceOrderRequest, UpdateLineStatusRequest};
use crate::app::services::AppServices;
use crate::app::{errors, routes::common::parse_id};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(place_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/lines/:id/status", post(update_line_status))
}

/// POST /orders - place an order from the caller's cart
pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<PlaceOrderRequest>,
) -> axum::response::Response {
    let cmd = PlaceOrder {
        address: body.address,
        phone_number: body.phone_number,
        payment: body.payment,
        idempotency_key: body.idempotency_key,
    };

    let order_id = match services.placement.place_order(&identity.identity(), cmd) {
        Ok(id) => id,
        Err(e) => return errors::service_error_to_response(e),
    };

    services.notify_cart_changed(identity.user_id(), "order_placed");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": order_id.to_string() })),
    )
        .into_response()
}

/// GET /orders - the caller's orders, newest first
pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
) -> axum::response::Response {
    let orders = match services.placement.list_orders(&identity.identity()) {
        Ok(o) => o,
        Err(e) => return errors::service_error_to_response(e),
    };

    let items: Vec<_> = orders.iter().map(dto::order_summary_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "orders": items }))).into_response()
}

/// GET /orders/:id - one order with its lines (buyer or admin)
pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match parse_id(&id, "invalid order id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let (order, lines) = match services.placement.get_order(&identity.identity(), order_id) {
        Ok(v) => v,
        Err(e) => return errors::service_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::order_json(&order, &lines))).into_response()
}

/// POST /orders/lines/:id/status - seller-side fulfillment update
pub async fn update_line_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateLineStatusRequest>,
) -> axum::response::Response {
    let line_id: OrderLineItemId = match parse_id(&id, "invalid order line id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let next = match errors::parse_fulfillment_status(&body.status) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let order_status = match services
        .fulfillment
        .update_line_status(&identity.identity(), line_id, next)
    {
        Ok(s) => s,
        Err(e) => return errors::service_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "line_status": next.as_str(),
            "order_status": order_status.as_str(),
        })),
    )
        .into_response()
}
