mod health_routes;
mod picture_routes;

use axum::{Router, extract::Request, middleware};
use tower_http::{
    limit::RequestBodyLimitLayer,
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::common::{AppState, metrics};

use health_routes::health_routes;
use picture_routes::picture_routes;

/// The full API router with tracing, metrics and the body limit applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(picture_routes())
        .with_state(state)
        .route_layer(middleware::from_fn(metrics::track_http))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri(),
                    client_ip = %req.headers().get("x-forwarded-for").and_then(|h| h.to_str().ok())
                    .unwrap_or("unknown"),
                )
            })
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(true))
            .on_failure(DefaultOnFailure::new().level(Level::INFO))
        )
        .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024 /* 10MiB */))
}
