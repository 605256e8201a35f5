//! JWT route guard.
//!
//! [`require_auth`] reads the token from the `Authorization` header or the
//! `token` query parameter, verifies it with [`JwtKeys`] and stores the
//! [`Claims`] in the request extensions. Handlers pick them up with the
//! [`Auth`] extractor.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{FromRequestParts, Query, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use restkit_core::auth::{extract_token, is_expired, AuthError, Claims};

use crate::ApiError;

/// Query parameter accepted as a fallback for the `Authorization` header.
pub const TOKEN_QUERY_KEY: &str = "token";

/// HS256 signing and verification keys.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Signs `claims` into a compact token.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verifies the signature and expiry of `token`.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            },
        )?;

        if is_expired(&data.claims, Utc::now().timestamp()) {
            return Err(AuthError::Expired);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

/// Middleware that rejects requests without a valid token.
///
/// Failures answer `401` with the error text as a JSON string.
pub async fn require_auth(
    State(keys): State<Arc<JwtKeys>>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = match authenticate(&keys, req.headers().get(AUTHORIZATION), req.uri()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected unauthenticated request");
            return (StatusCode::UNAUTHORIZED, Json(e.to_string())).into_response();
        }
    };

    tracing::debug!(sub = %claims.sub, "Authenticated request");
    req.extensions_mut().insert(claims);

    next.run(req).await
}

fn authenticate(
    keys: &JwtKeys,
    authorization: Option<&axum::http::HeaderValue>,
    uri: &axum::http::Uri,
) -> Result<Claims, AuthError> {
    let header = authorization.and_then(|v| v.to_str().ok());
    let query = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map(|Query(params)| params)
        .unwrap_or_default();

    let token = extract_token(header, query.get(TOKEN_QUERY_KEY).map(String::as_str))
        .ok_or(AuthError::MissingToken)?;

    keys.decode(&token)
}

/// Claims of the authenticated caller.
///
/// Only available behind [`require_auth`]; elsewhere it rejects with 401.
#[derive(Debug, Clone)]
pub struct Auth(pub Claims);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized(AuthError::MissingToken.to_string()))
    }
}
