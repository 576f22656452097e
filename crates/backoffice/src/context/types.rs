//! Pure types for request-scoped context.

use backoffice_core::auth::Principal;
use uuid::Uuid;

/// Unique identifier for a request, used for tracing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context of an authenticated admin request.
///
/// Complements `AppState` (application-scoped) with request-specific data.
/// Extracting it is what gates an admin endpoint.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The admin the bearer token resolved to.
    pub principal: Principal,
    /// Unique request identifier for tracing.
    pub request_id: RequestId,
}
