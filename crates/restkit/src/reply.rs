use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use restkit_core::{pagination::Page, response::PagedBody};
use serde::Serialize;

use crate::ApiError;

/// Result type for handlers built on [`Reply`] and [`ApiError`].
pub type ApiResult<T = ()> = Result<Reply<T>, ApiError>;

/// Success side of a handler result.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T = ()> {
    /// 200 with `data` as the body.
    Resource(T),
    /// 201 with `data` as the body.
    Created(T),
    /// 204 with no body.
    Deleted,
    /// 200 with `{data, total}`.
    Paged(PagedBody<Vec<T>>),
}

impl<T> Reply<T> {
    pub fn resource(data: T) -> Self {
        Reply::Resource(data)
    }

    pub fn created(data: T) -> Self {
        Reply::Created(data)
    }

    pub fn deleted() -> Self {
        Reply::Deleted
    }

    pub fn page(data: Vec<T>, total: u64) -> Self {
        Reply::Paged(PagedBody { data, total })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Resource(_) | Reply::Paged(_) => StatusCode::OK,
            Reply::Created(_) => StatusCode::CREATED,
            Reply::Deleted => StatusCode::NO_CONTENT,
        }
    }
}

impl<T> From<Page<T>> for Reply<T> {
    fn from(page: Page<T>) -> Self {
        Reply::page(page.items, page.total)
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Reply::Resource(data) | Reply::Created(data) => (status, Json(data)).into_response(),
            Reply::Deleted => status.into_response(),
            Reply::Paged(body) => (status, Json(body)).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    use super::*;

    async fn render<T: Serialize>(reply: Reply<T>) -> (StatusCode, Vec<u8>) {
        let response = reply.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_resource_is_200() {
        let (status, body) = render(Reply::resource(json!({ "id": 1 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn test_created_is_201() {
        let (status, _) = render(Reply::created("new")).await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_deleted_is_204_without_body() {
        let (status, body) = render(Reply::<()>::deleted()).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_page_wraps_data_and_total() {
        let (status, body) = render(Reply::page(vec!["a", "b"], 12)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({ "data": ["a", "b"], "total": 12 })
        );
    }

    #[test]
    fn test_from_page() {
        let reply: Reply<u8> = Page::new(vec![1, 2], 5).into();

        assert_eq!(reply, Reply::page(vec![1, 2], 5));
    }
}
