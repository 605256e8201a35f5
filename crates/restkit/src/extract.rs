//! Binding extractors that deserialize and then validate.
//!
//! Each extractor rejects with a 422 [`ApiError::Invalid`] whose code says
//! where the input came from (`input:query`, `input:uri`, `input:body`).

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Form, Json,
};
use restkit_core::{
    response::{CODE_INPUT_BODY, CODE_INPUT_QUERY, CODE_INPUT_URI},
    validation::type_root,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::ApiError;

/// Validated query string.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

/// Validated path parameters.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

/// Validated JSON body.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

/// Validated `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone)]
pub struct ValidForm<T>(pub T);

fn validated<T: Validate>(code: &str, value: T) -> Result<T, ApiError> {
    match value.validate() {
        Ok(()) => Ok(value),
        Err(errors) => Err(ApiError::from_validation(code, type_root::<T>(), &errors)),
    }
}

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid(CODE_INPUT_QUERY, e.body_text()))?;

        validated(CODE_INPUT_QUERY, value).map(ValidQuery)
    }
}

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid(CODE_INPUT_URI, e.body_text()))?;

        validated(CODE_INPUT_URI, value).map(ValidPath)
    }
}

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid(CODE_INPUT_BODY, e.body_text()))?;

        validated(CODE_INPUT_BODY, value).map(ValidJson)
    }
}

impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid(CODE_INPUT_BODY, e.body_text()))?;

        validated(CODE_INPUT_BODY, value).map(ValidForm)
    }
}
