//! Layers wrapped around every route

mod cors;
mod trace;

use std::time::Duration;

use axum::{
    http::{header::HeaderName, StatusCode},
    Router,
};
use gallery_common::CorsConfig;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub use cors::OriginPolicy;
pub use trace::RequestSpan;

/// Header carrying the per-request id, generated when the client sends none
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wrap the router. A request passes the id layers first and the gzip
/// layer last; a handler that overruns the timeout answers 503.
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let policy = OriginPolicy::from_config(cors_config, is_production);
    policy.log();

    let stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(policy.into_layer())
        .layer(CompressionLayer::new());

    router.layer(stack)
}
