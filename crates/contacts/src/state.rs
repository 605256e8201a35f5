//! Shared application state.
//!
//! Everything here is immutable after start-up or internally synchronized
//! (the SQLite pool), so the state is cloned freely into every handler.

use std::sync::Arc;

use axum::extract::FromRef;
use restkit::{JwtKeys, PageConfig};

use crate::{config::Config, storage::ContactStore};

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ContactStore,
    pub page: PageConfig,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(store: ContactStore, config: &Config) -> Self {
        Self {
            store,
            page: config.page.clone(),
            keys: Arc::new(JwtKeys::new(config.jwt_secret.as_bytes())),
        }
    }
}

impl FromRef<AppState> for PageConfig {
    fn from_ref(state: &AppState) -> Self {
        state.page.clone()
    }
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}
