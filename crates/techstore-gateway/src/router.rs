//! Axum router wiring.
//!
//! Every route, including the 404 fallback, passes through the request
//! metrics middleware; `TraceLayer` wraps the whole stack.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{api, app_state::AppState, obs, ops, pages};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/health", get(ops::health))
        .route("/api/ping", get(ops::ping))
        .route("/version", get(ops::version))
        .route("/metrics", get(ops::metrics))
        .route("/api/products", get(api::products::list))
        .route("/api/products/:id", get(api::products::get_one))
        .route("/api/categories", get(api::products::categories))
        .route("/api/cart", get(api::cart::get_cart).post(api::cart::add_item))
        .route("/api/cart/:product_id", delete(api::cart::remove_item))
        .route("/api/checkout", post(api::cart::checkout))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
