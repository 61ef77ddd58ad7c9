use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde_json::json;

use techstore_core::error::StoreError;
use techstore_core::request::AddToCart;

use crate::app_state::AppState;
use crate::error::ApiResult;

pub async fn get_cart(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let session = state.sessions().resolve(&headers);
    Json(state.carts().get_cart(&session))
}

pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let req = AddToCart::parse(&body)?;
    let session = state.sessions().resolve(&headers);
    let items = state
        .carts()
        .add_item(&session, req.product_id, req.quantity())?;
    Ok(Json(items))
}

pub async fn remove_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let product_id: u32 = product_id
        .parse()
        .map_err(|_| StoreError::Validation(format!("invalid product id: {product_id}")))?;
    let session = state.sessions().resolve(&headers);
    Ok(Json(state.carts().remove_item(&session, product_id)))
}

/// Checkout stub: totals the cart, issues an order id, empties the cart.
/// No payment is taken.
pub async fn checkout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<impl IntoResponse> {
    let session = state.sessions().resolve(&headers);
    let cart = state.carts().clear(&session);
    if cart.is_empty() {
        return Err(StoreError::BadRequest("cart is empty".into()).into());
    }

    let order_id = state.next_order_id();
    let total = (cart.total() * 100.0).round() / 100.0;
    tracing::info!(%session, %order_id, items = cart.item_count(), total, "checkout");

    Ok(Json(json!({
        "ok": true,
        "orderId": order_id,
        "itemCount": cart.item_count(),
        "total": total,
    })))
}
