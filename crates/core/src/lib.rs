//! Functional core for restkit.
//!
//! Pure types and functions behind the HTTP helpers: page cursors and
//! sources, CORS decisions, response bodies, error fingerprints,
//! validation messages and token extraction. Nothing in here knows about
//! axum; the `restkit` crate is the imperative shell.

pub mod auth;
pub mod cors;
pub mod fingerprint;
pub mod mode;
pub mod pagination;
pub mod response;
pub mod serde;
pub mod validation;
