//! Catalog and stock routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use brocante_catalog::NewProduct;
use brocante_core::ProductId;

use crate::app::dto::{self, CreateProductRequest, SetStockRequest};
use crate::app::services::AppServices;
use crate::app::{errors, routes::common::parse_id};
use crate::context::IdentityContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product))
        .route("/:id", get(get_product))
        .route("/:id/stock", put(set_stock))
}

/// POST /products - create a product owned by the calling seller
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Json(body): Json<CreateProductRequest>,
) -> axum::response::Response {
    let attrs = NewProduct {
        title: body.title,
        price: body.price,
        stock: body.stock,
        colors: body.colors.into_iter().collect(),
        sizes: body.sizes.into_iter().collect(),
        primary_image: body.primary_image,
    };

    let product = match services.catalog.create_product(&identity.identity(), attrs) {
        Ok(p) => p,
        Err(e) => return errors::service_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::product_json(&product))).into_response()
}

/// GET /products/:id
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match parse_id(&id, "invalid product id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.get_product(product_id) {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_failure",
            e.to_string(),
        ),
    }
}

/// PUT /products/:id/stock - authoritative stock correction (owner or admin)
pub async fn set_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Path(id): Path<String>,
    Json(body): Json<SetStockRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match parse_id(&id, "invalid product id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let stock = match services
        .inventory
        .set_stock(&identity.identity(), product_id, body.stock)
    {
        Ok(s) => s,
        Err(e) => return errors::service_error_to_response(e),
    };

    (StatusCode::OK, Json(serde_json::json!({ "stock": stock }))).into_response()
}
