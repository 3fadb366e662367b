use axum::{Router, routing::get};

pub mod cart;
pub mod common;
pub mod orders;
pub mod products;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/products", products::router())
}
