use axum::{extract::State, http::StatusCode, Json};

use backoffice_core::shop::{
    Competitor, CompetitorSummary, CreateCompetitorRequest, ListCompetitorsQuery,
    UpdateCompetitorRequest,
};

use super::envelope::{created, list, message, ok, DataEnvelope, ListEnvelope, MessageEnvelope};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiError, AppError};
use crate::{context::RequestContext, state::AppState};

/// List competitors (GET /api/competitors), highest threat first.
pub async fn list_competitors(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListCompetitorsQuery>,
) -> Result<Json<ListEnvelope<Competitor>>, AppError> {
    let (filter, pagination) = query.into_parts();
    let page = state
        .competitors
        .list_competitors(&filter, pagination)
        .await?;

    tracing::debug!(request_id = %ctx.request_id, total = page.total, "Listed competitors");

    Ok(list(page))
}

/// Competitive landscape aggregates (GET /api/competitors/summary).
pub async fn competitor_summary(
    _ctx: RequestContext,
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<CompetitorSummary>>, AppError> {
    Ok(ok(state.competitors.competitor_summary().await?))
}

/// Get a competitor (GET /api/competitors/{id}).
pub async fn get_competitor(
    _ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DataEnvelope<Competitor>>, AppError> {
    let competitor = state
        .competitors
        .get_competitor(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Competitor",
            id,
        })?;

    Ok(ok(competitor))
}

/// Create a competitor (POST /api/competitors).
pub async fn create_competitor(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCompetitorRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<Competitor>>), AppError> {
    let new_competitor = payload.into_new_competitor()?;
    let competitor = state
        .competitors
        .create_competitor(&new_competitor)
        .await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        competitor_id = competitor.id,
        threat_level = %competitor.threat_level,
        "Created competitor"
    );

    Ok(created(competitor))
}

/// Update a competitor (PUT /api/competitors/{id}).
pub async fn update_competitor(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCompetitorRequest>,
) -> Result<Json<DataEnvelope<Competitor>>, AppError> {
    payload.validate()?;
    let competitor = state.competitors.update_competitor(id, &payload).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        competitor_id = id,
        "Updated competitor"
    );

    Ok(ok(competitor))
}

/// Delete a competitor (DELETE /api/competitors/{id}).
pub async fn delete_competitor(
    ctx: RequestContext,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageEnvelope>, AppError> {
    state.competitors.delete_competitor(id).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        admin = %ctx.principal.subject,
        competitor_id = id,
        "Deleted competitor"
    );

    Ok(message("Competitor deleted"))
}
