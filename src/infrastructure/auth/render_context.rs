use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::domain::filter::RequestContext;

/// Header the host sets to say what kind of page it is rendering.
pub const X_RENDER_CONTEXT: &str = "x-render-context";

/// Built once per request from `x-render-context`. A missing or unknown value
/// is treated as a background/API request, so nothing gets filtered.
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(X_RENDER_CONTEXT)
            .and_then(|v| v.to_str().ok());

        let ctx = match header {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::debug!(error = %e, "Unrecognized render context");
                RequestContext::default()
            }),
            None => RequestContext::default(),
        };

        Ok(ctx)
    }
}
