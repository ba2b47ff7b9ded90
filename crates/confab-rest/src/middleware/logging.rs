//! Request logging middleware.

use axum::{
    body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response,
};
use std::time::Instant;
use tracing::info;

/// Logs one line per completed request.
///
/// The matched route template is logged alongside the raw URI so log
/// aggregation can group by endpoint (`/api/v1/presence/:user_id`) rather
/// than by concrete user and conversation ids, which are unbounded.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        target: "http",
        method = %method,
        route = route.as_deref().unwrap_or("<unmatched>"),
        uri = %uri,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
