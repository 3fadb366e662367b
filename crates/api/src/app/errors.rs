use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use brocante_cart::LineItemStatus;
use brocante_core::DomainError;
use brocante_infra::ServiceError;
use brocante_orders::FulfillmentStatus;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_failure",
            e.to_string(),
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", message),
        DomainError::OutOfStock => json_error(StatusCode::CONFLICT, "out_of_stock", message),
        DomainError::InvalidQuantity { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_quantity", message)
        }
        DomainError::EmptyCart => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "empty_cart", message)
        }
        DomainError::InvalidStatus(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_status", message)
        }
        DomainError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_line_status(s: &str) -> Result<LineItemStatus, axum::response::Response> {
    match s.to_lowercase().as_str() {
        "cart" => Ok(LineItemStatus::Cart),
        "wishlist" => Ok(LineItemStatus::Wishlist),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status",
            "status must be one of: cart, wishlist",
        )),
    }
}

pub fn parse_fulfillment_status(s: &str) -> Result<FulfillmentStatus, axum::response::Response> {
    match s.to_uppercase().as_str() {
        "PENDING" => Ok(FulfillmentStatus::Pending),
        "CONFIRMED" => Ok(FulfillmentStatus::Confirmed),
        "SHIPPED" => Ok(FulfillmentStatus::Shipped),
        "DELIVERED" => Ok(FulfillmentStatus::Delivered),
        "CANCELLED" => Ok(FulfillmentStatus::Cancelled),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status",
            "status must be one of: PENDING, CONFIRMED, SHIPPED, DELIVERED, CANCELLED",
        )),
    }
}
