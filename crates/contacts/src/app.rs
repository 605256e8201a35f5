use axum::{http::StatusCode, middleware, routing::get, Router};
use restkit::{auth::require_auth, cors::with_cors, recovery::catch_panic_layer};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    config::Config,
    handlers::{
        contacts::{create_contact, delete_contact, get_contact, list_contacts},
        health::health,
        me::me,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    // Token-protected API routes
    let api_routes = Router::new()
        .route("/me", get(me))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route("/contacts/{id}", get(get_contact).delete(delete_contact))
        .layer(middleware::from_fn_with_state(state.keys.clone(), require_auth));

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(catch_panic_layer());

    // CORS sits outside auth so preflight requests never need a token
    with_cors(router, config.cors.clone())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .with_state(state)
}
