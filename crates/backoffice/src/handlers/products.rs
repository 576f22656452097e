use axum::{extract::State, http::StatusCode, Json};

use backoffice_core::shop::{
    CreateProductRequest, ListProductsQuery, Product, ProductStats, UpdateProductRequest,
};

use super::envelope::{created, list, message, ok, DataEnvelope, ListEnvelope, MessageEnvelope};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiError, AppError};
use crate::{context::RequestContext, state::AppState};

/// List products (GET /api/products).
///
/// Filters: `category`, `active`, `search` (name, description or SKU).
pub async fn list_products(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListProductsQuery>,
) -> Result<Json<ListEnvelope<Product>>, AppError> {
    let (filter, pagination) = query.into_parts();
    let page = state.products.list_products(&filter, pagination).await?;

    tracing::debug!(request_id = %ctx.request_id, total = page.total, "Listed products");

    Ok(list(page))
}

/// Distinct product categories (GET /api/products/categories).
pub async fn list_categories(
    _ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<String>>>, AppError> {
    Ok(ok(state.products.list_categories().await?))
}

/// Catalog aggregates (GET /api/products/stats).
pub async fn product_stats(
    _ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<ProductStats>>, AppError> {
    Ok(ok(state.products.product_stats().await?))
}

/// Get a product (GET /api/products/{id}).
pub async fn get_product(
    _ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DataEnvelope<Product>>, AppError> {
    let product = state
        .products
        .get_product(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Product",
            id,
        })?;

    Ok(ok(product))
}

/// Create a product (POST /api/products).
pub async fn create_product(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<Product>>), AppError> {
    let new_product = payload.into_new_product()?;
    let product = state.products.create_product(&new_product).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        product_id = product.id,
        name = %product.name,
        "Created product"
    );

    Ok(created(product))
}

/// Update a product (PUT /api/products/{id}).
pub async fn update_product(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateProductRequest>,
) -> Result<Json<DataEnvelope<Product>>, AppError> {
    payload.validate()?;
    let product = state.products.update_product(id, &payload).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        product_id = id,
        "Updated product"
    );

    Ok(ok(product))
}

/// Delete a product (DELETE /api/products/{id}).
///
/// Line items that referenced it keep their name snapshot.
pub async fn delete_product(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageEnvelope>, AppError> {
    state.products.delete_product(id).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        product_id = id,
        "Deleted product"
    );

    Ok(message("Product deleted"))
}
