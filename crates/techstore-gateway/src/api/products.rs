use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use techstore_core::catalog::{Product, ProductQuery};
use techstore_core::error::StoreError;

use crate::app_state::AppState;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct ProductsParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductsParams>,
) -> impl IntoResponse {
    let query = ProductQuery {
        category: non_empty(params.category),
        search: non_empty(params.search),
    };
    let products: Vec<Product> = state.catalog().filter(&query).into_iter().cloned().collect();
    Json(products)
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    // Non-numeric ids can never match, same as an unknown numeric id.
    let id: u32 = id.parse().map_err(|_| StoreError::ProductNotFound(0))?;
    let product = state
        .catalog()
        .get(id)
        .ok_or(StoreError::ProductNotFound(id))?;
    Ok(Json(product.clone()))
}

pub async fn categories(State(state): State<AppState>) -> impl IntoResponse {
    let categories: Vec<String> = state
        .catalog()
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(categories)
}
