//! HTTP front serving dashboard assets cache-first

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::cache::{OfflineCache, Source};

/// Build the offline asset router
pub fn build_router(cache: OfflineCache) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(asset_handler)
        .with_state(cache)
}

async fn asset_handler(
    State(cache): State<OfflineCache>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
    match cache.fetch(path).await {
        Ok((asset, source)) => {
            let status = StatusCode::from_u16(asset.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut response = (status, asset.body).into_response();
            let headers = response.headers_mut();
            if let Some(value) = asset
                .content_type
                .as_deref()
                .and_then(|ct| HeaderValue::from_str(ct).ok())
            {
                headers.insert(header::CONTENT_TYPE, value);
            }
            let marker = match source {
                Source::Cache => "hit",
                Source::Network => "miss",
            };
            headers.insert("x-cache", HeaderValue::from_static(marker));
            response
        }
        Err(e) => {
            tracing::warn!("Serving {} failed: {}", path, e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
