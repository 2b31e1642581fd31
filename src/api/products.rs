//! Product Handlers
//!
//! CRUD endpoints for the book catalogue. Writes drop every cached
//! product listing so the next GET sees fresh data.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::api::handlers::AppState;
use crate::api::routes::PRODUCTS_PATH;
use crate::auth::AuthUser;
use crate::cache::path_pattern;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateProductRequest, MessageResponse, Product, ProductQuery, UpdateProductRequest,
};

async fn invalidate_products(state: &AppState) {
    state.cache.delete_pattern(&path_pattern(PRODUCTS_PATH)).await;
}

fn not_found() -> ApiError {
    ApiError::NotFound("Product not found".to_string())
}

/// Handler for POST /api/products
pub async fn add_product(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        title: req.title,
        author: req.author,
        price: req.price,
        category: req.category,
        publisher: req.publisher,
        isbn: req.isbn,
        stock: req.stock.unwrap_or(0),
        created_at: now,
        updated_at: now,
    };

    if let Some(error_msg) = product.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state.products.create(product).await?;
    invalidate_products(&state).await;

    info!(product_id = %product.id, user = %claims.sub, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /api/products
///
/// Supports `category`, `minPrice` and `maxPrice` filters.
pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.products.find(&query).await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    state
        .products
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Handler for PUT /api/products/:id
///
/// Applies a partial update and re-validates the result.
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let mut product = state.products.find_by_id(id).await?.ok_or_else(not_found)?;

    req.apply(&mut product);
    product.updated_at = Utc::now();

    if let Some(error_msg) = product.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state.products.save(product).await?;
    invalidate_products(&state).await;

    Ok(Json(product))
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    if !state.products.delete(id).await? {
        return Err(not_found());
    }
    invalidate_products(&state).await;

    Ok(Json(MessageResponse::new("Product deleted")))
}
