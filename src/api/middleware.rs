//! API Middleware
//!
//! Attaches the per-request [`RequestContext`] resolved from the
//! `Authorization` header.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use super::handlers::AppState;

/// Resolves the caller for this request and stores it as a request extension.
///
/// Requests without a valid token still proceed with an anonymous context;
/// handlers that need a caller reject them.
pub async fn attach_request_context<C>(
    State(state): State<AppState<C>>,
    mut request: Request,
    next: Next,
) -> Response
where
    C: Send + Sync,
{
    let ctx = {
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        state.tokens.resolve(authorization)
    };

    request.extensions_mut().insert(ctx);
    next.run(request).await
}
