use axum::{extract::State, http::StatusCode, Json};

use backoffice_core::shop::{
    CreateOrderRequest, ListOrdersQuery, Order, OrderDetail, OrderStats, UpdateOrderRequest,
};

use super::envelope::{created, list, message, ok, DataEnvelope, ListEnvelope, MessageEnvelope};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiError, AppError};
use crate::{context::RequestContext, state::AppState};

/// List orders (GET /api/orders).
///
/// Filters: `status`, `payment_status`, `search` (order number, customer
/// name or email). Newest first.
pub async fn list_orders(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListOrdersQuery>,
) -> Result<Json<ListEnvelope<Order>>, AppError> {
    let (filter, pagination) = query.into_parts();
    let page = state.orders.list_orders(&filter, pagination).await?;

    tracing::debug!(request_id = %ctx.request_id, total = page.total, "Listed orders");

    Ok(list(page))
}

/// Order aggregates (GET /api/orders/stats).
pub async fn order_stats(
    _ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<OrderStats>>, AppError> {
    Ok(ok(state.orders.order_stats().await?))
}

/// Get an order with its line items (GET /api/orders/{id}).
pub async fn get_order(
    _ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DataEnvelope<OrderDetail>>, AppError> {
    let order = state
        .orders
        .get_order(id)
        .await?
        .ok_or(ApiError::NotFound { entity: "Order", id })?;

    Ok(ok(order))
}

/// Create an order (POST /api/orders).
///
/// Totals are computed here, never taken from the client.
pub async fn create_order(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<OrderDetail>>), AppError> {
    let new_order = payload.into_new_order()?;
    let order = state.orders.create_order(&new_order).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        order_id = order.order.id,
        order_number = %order.order.order_number,
        total = order.order.total,
        items = order.items.len(),
        "Created order"
    );

    Ok(created(order))
}

/// Update order status, payment status, payment method or notes
/// (PUT /api/orders/{id}).
pub async fn update_order(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateOrderRequest>,
) -> Result<Json<DataEnvelope<Order>>, AppError> {
    let order = state.orders.update_order(id, &payload).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        order_id = id,
        status = %order.status,
        payment_status = %order.payment_status,
        "Updated order"
    );

    Ok(ok(order))
}

/// Delete an order and its line items (DELETE /api/orders/{id}).
pub async fn delete_order(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageEnvelope>, AppError> {
    state.orders.delete_order(id).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        order_id = id,
        "Deleted order"
    );

    Ok(message("Order deleted"))
}
