use serde::Deserialize;
use serde_json::json;

use brocante_cart::LineItem;
use brocante_catalog::Product;
use brocante_orders::{Order, OrderLineItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: u32,
    /// "cart" (default) or "wishlist".
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct GuestLineRequest {
    pub product_id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: u32,
    pub price: u64,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MergeCartRequest {
    pub lines: Vec<GuestLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub address: String,
    pub phone_number: String,
    pub payment: String,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLineStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub price: u64,
    pub stock: u32,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub primary_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStockRequest {
    pub stock: i64,
}

// -------------------------
// Response mapping
// -------------------------

pub fn line_item_json(line: &LineItem) -> serde_json::Value {
    json!({
        "id": line.id.to_string(),
        "product_id": line.product_id.to_string(),
        "color": line.variant.color,
        "size": line.variant.size,
        "quantity": line.quantity,
        "status": line.status.as_str(),
        "unit_price": line.unit_price,
        "image": line.image,
        "created_at": line.created_at.to_rfc3339(),
    })
}

pub fn product_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id.to_string(),
        "seller_id": product.seller_id.to_string(),
        "title": product.title,
        "price": product.price,
        "stock": product.stock,
        "colors": product.colors,
        "sizes": product.sizes,
        "primary_image": product.primary_image,
        "created_at": product.created_at.to_rfc3339(),
    })
}

pub fn order_json(order: &Order, lines: &[OrderLineItem]) -> serde_json::Value {
    json!({
        "id": order.id.to_string(),
        "address": order.address,
        "phone_number": order.phone_number,
        "payment": order.payment,
        "status": order.status.as_str(),
        "total": order.total,
        "created_at": order.created_at.to_rfc3339(),
        "lines": lines.iter().map(order_line_json).collect::<Vec<_>>(),
    })
}

pub fn order_summary_json(order: &Order) -> serde_json::Value {
    json!({
        "id": order.id.to_string(),
        "status": order.status.as_str(),
        "total": order.total,
        "created_at": order.created_at.to_rfc3339(),
    })
}

pub fn order_line_json(line: &OrderLineItem) -> serde_json::Value {
    json!({
        "id": line.id.to_string(),
        "product_id": line.product_id.to_string(),
        "seller_id": line.seller_id.to_string(),
        "quantity": line.quantity,
        "unit_price": line.unit_price,
        "color": line.variant.color,
        "size": line.variant.size,
        "status": line.status.as_str(),
    })
}
