//! CORS middleware.
//!
//! Allowed origins get the `Access-Control-*` headers computed by
//! [`CorsConfig::response_headers`]. Preflight (`OPTIONS`) requests from
//! allowed origins are answered with `204 No Content` and never reach the
//! router. Requests from other origins pass through unchanged.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{ORIGIN, VARY},
        HeaderName, HeaderValue, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use restkit_core::cors::{is_preflight, CorsConfig};

/// Middleware function; mount with [`with_cors`] or
/// `axum::middleware::from_fn_with_state(Arc::new(config), cors)`.
pub async fn cors(State(config): State<Arc<CorsConfig>>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let Some(headers) = config.response_headers(origin.as_deref()) else {
        return next.run(req).await;
    };

    let mut response = if is_preflight(req.method().as_str()) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let echoes_origin = origin.is_some_and(|o| !o.is_empty());

    let target = response.headers_mut();
    if echoes_origin {
        target.append(VARY, HeaderValue::from_static("origin"));
    }
    for (name, value) in headers {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                target.insert(HeaderName::from_static(name), value);
            }
            Err(e) => {
                tracing::warn!(header = name, error = %e, "Skipping unrepresentable CORS header");
            }
        }
    }

    response
}

/// Wraps every route of `router` with the CORS middleware.
pub fn with_cors<S>(router: Router<S>, config: CorsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(Arc::new(config), cors))
}
