use axum::{extract::State, http::StatusCode, Json};

use backoffice_core::shop::{
    CreateCustomerRequest, Customer, CustomerDetail, CustomerStats, ListCustomersQuery,
    UpdateCustomerRequest,
};

use super::envelope::{created, list, message, ok, DataEnvelope, ListEnvelope, MessageEnvelope};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiError, AppError};
use crate::{context::RequestContext, state::AppState};

/// Orders shown on the customer detail view.
const RECENT_ORDERS_LIMIT: i64 = 10;

/// List customers (GET /api/customers).
///
/// Filters: `search` (name, email or phone), `segment`. Newest first.
pub async fn list_customers(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListCustomersQuery>,
) -> Result<Json<ListEnvelope<Customer>>, AppError> {
    let (filter, pagination) = query.into_parts();
    let page = state.customers.list_customers(&filter, pagination).await?;

    tracing::debug!(request_id = %ctx.request_id, total = page.total, "Listed customers");

    Ok(list(page))
}

/// Customer aggregates (GET /api/customers/stats).
pub async fn customer_stats(
    _ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<CustomerStats>>, AppError> {
    Ok(ok(state.customers.customer_stats().await?))
}

/// Get a customer with their most recent orders (GET /api/customers/{id}).
pub async fn get_customer(
    _ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DataEnvelope<CustomerDetail>>, AppError> {
    let customer = state
        .customers
        .get_customer(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Customer",
            id,
        })?;
    let recent_orders = state
        .orders
        .recent_orders_for_customer(id, RECENT_ORDERS_LIMIT)
        .await?;

    Ok(ok(CustomerDetail {
        customer,
        recent_orders,
    }))
}

/// Create a customer (POST /api/customers). A taken email is a 400.
pub async fn create_customer(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<Customer>>), AppError> {
    let new_customer = payload.into_new_customer()?;
    let customer = state.customers.create_customer(&new_customer).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        customer_id = customer.id,
        segment = %customer.segment,
        "Created customer"
    );

    Ok(created(customer))
}

/// Update a customer's contact details, segment or notes
/// (PUT /api/customers/{id}).
pub async fn update_customer(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<DataEnvelope<Customer>>, AppError> {
    let customer = state.customers.update_customer(id, &payload).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        customer_id = id,
        "Updated customer"
    );

    Ok(ok(customer))
}

/// Delete a customer (DELETE /api/customers/{id}). Their orders are kept.
pub async fn delete_customer(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageEnvelope>, AppError> {
    state.customers.delete_customer(id).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        customer_id = id,
        "Deleted customer"
    );

    Ok(message("Customer deleted"))
}
