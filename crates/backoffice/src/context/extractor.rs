//! Axum extractor for RequestContext.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

use backoffice_core::auth::BearerToken;

use super::types::{RequestContext, RequestId};
use crate::handlers::{ApiError, AppError};
use crate::state::AuthState;

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<BearerToken, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("Missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(BearerToken::new)
        .ok_or(ApiError::Unauthorized("Missing bearer token"))
}

impl<S> FromRequestParts<S> for RequestContext
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let request_id = extract_request_id(&parts.headers);
        let token = extract_bearer_token(&parts.headers)?;

        let principal = auth_state
            .verifier
            .verify(&token)
            .await?
            .ok_or(ApiError::Unauthorized("Invalid token"))?;

        if !principal.is_admin() {
            tracing::warn!(
                %request_id,
                subject = %principal.subject,
                role = %principal.role,
                "Non-admin caller rejected"
            );
            return Err(ApiError::Forbidden("Admin access required").into());
        }

        Ok(RequestContext {
            principal,
            request_id,
        })
    }
}
