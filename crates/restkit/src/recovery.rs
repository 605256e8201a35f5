//! Panic recovery and server-error reporting.
//!
//! Unexpected failures never leak details to the client. The message is
//! logged next to a fingerprint under the `server_error` target and the
//! client receives `422 {"code": "server", "message": "<fingerprint>"}`.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use restkit_core::{
    fingerprint::error_fingerprint,
    response::{ErrorBody, CODE_SERVER},
};
use tower_http::catch_panic::CatchPanicLayer;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Logs `message` with a fresh fingerprint and builds the client response.
pub fn server_error_response(message: &str) -> Response {
    let fingerprint = error_fingerprint(Utc::now().timestamp(), message);

    tracing::error!(
        target: "server_error",
        fingerprint = %fingerprint,
        "{fingerprint}-{message}"
    );

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody::new(CODE_SERVER, fingerprint)),
    )
        .into_response()
}

/// Layer that turns handler panics into [`server_error_response`].
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    server_error_response(&panic_message(payload.as_ref()))
}

/// Text of a panic payload. `panic!` produces `&str` or `String`; anything
/// else gets a generic description.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use restkit_core::mode::AppMode;
    use tower::ServiceExt;
    use tracing_subscriber::EnvFilter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `server_error_response` under the default filter of `mode` and
    /// returns the log output next to the fingerprint sent to the client.
    async fn log_for_mode(mode: AppMode) -> (String, String) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(mode.default_log_filter()))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let response = tracing::subscriber::with_default(subscriber, || {
            server_error_response("disk full")
        });

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let fingerprint = json["message"].as_str().unwrap().to_string();

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        (output, fingerprint)
    }

    #[tokio::test]
    async fn test_server_error_is_logged_in_every_mode() {
        for mode in [AppMode::Debug, AppMode::Release, AppMode::Test] {
            let (output, fingerprint) = log_for_mode(mode).await;

            assert!(output.contains("server_error"), "{mode}: {output:?}");
            assert!(
                output.contains(&format!("{fingerprint}-disk full")),
                "{mode}: {output:?}"
            );
        }
    }

    #[test]
    fn test_panic_message_from_str() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
    }

    #[test]
    fn test_panic_message_from_string() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("index out of bounds"));
        assert_eq!(panic_message(payload.as_ref()), "index out of bounds");
    }

    #[test]
    fn test_panic_message_from_other() {
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(
            panic_message(payload.as_ref()),
            "handler panicked with a non-string payload"
        );
    }

    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_422() {
        let app = Router::new()
            .route("/boom", get(explode))
            .layer(catch_panic_layer());

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["code"], "server");
        assert_eq!(json["message"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_healthy_handler_is_untouched() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(catch_panic_layer());

        let response = app
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
