//! Per-request context shared through axum extensions

/// Context attached to every request by the request-id middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
