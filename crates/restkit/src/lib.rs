//! Request helpers for axum services.
//!
//! This crate provides:
//! - Page cursors read from the query string, plus in-memory and SQLite page sources
//! - CORS middleware driven by a [`CorsConfig`]
//! - A panic-recovery layer that answers with a fingerprinted JSON error
//! - [`Reply`] and [`ApiError`] for shaping success and error responses
//! - Validated binding extractors for query, path and body
//! - JWT route guard and [`Auth`] extractor

pub mod auth;
pub mod cors;
mod error;
pub mod extract;
pub mod pagination;
pub mod recovery;
mod reply;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use auth::{Auth, JwtKeys};
pub use error::{ApiError, ResultExt};
pub use extract::{ValidForm, ValidJson, ValidPath, ValidQuery};
pub use pagination::Pagination;
pub use reply::{ApiResult, Reply};

pub use restkit_core::auth::Claims;
pub use restkit_core::cors::CorsConfig;
pub use restkit_core::mode::AppMode;
pub use restkit_core::pagination::{Page, PageConfig, PageCursor, PageSource, SourceError};
