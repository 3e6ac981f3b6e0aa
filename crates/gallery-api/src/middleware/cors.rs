use axum::http::{header, HeaderName, HeaderValue, Method};
use gallery_common::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::REQUEST_ID_HEADER;

/// Which browser origins may call the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Only the configured origins; unparsable entries are dropped
    Listed(Vec<HeaderValue>),
    /// Nothing configured in production
    Closed,
    /// Nothing configured outside production
    Open,
}

impl OriginPolicy {
    pub fn from_config(config: &CorsConfig, is_production: bool) -> Self {
        if config.allowed_origins.is_empty() {
            return if is_production { Self::Closed } else { Self::Open };
        }

        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        Self::Listed(origins)
    }

    pub fn log(&self) {
        match self {
            Self::Listed(origins) => tracing::info!(count = origins.len(), "CORS origins configured"),
            Self::Closed => tracing::warn!(
                "No CORS_ALLOWED_ORIGINS set in production; browser requests will be refused"
            ),
            Self::Open => tracing::warn!("CORS open to any origin"),
        }
    }

    pub fn into_layer(self) -> CorsLayer {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
        let allow_origin = match self {
            Self::Listed(origins) => AllowOrigin::list(origins),
            Self::Closed => AllowOrigin::list(Vec::<HeaderValue>::new()),
            Self::Open => AllowOrigin::any(),
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::ACCEPT,
                request_id.clone(),
            ])
            .expose_headers([request_id])
    }
}
