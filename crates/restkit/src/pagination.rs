//! Request-scoped pagination.
//!
//! [`Pagination`] reads the page cursor from the query string using the
//! application's [`PageConfig`] and runs it against any [`PageSource`].

use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use restkit_core::pagination::{paginate, Page, PageConfig, PageCursor, PageSource, SourceError};

/// Page cursor of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination(pub PageCursor);

impl Pagination {
    pub fn cursor(&self) -> PageCursor {
        self.0
    }

    /// Fetches the requested page from `source`.
    pub async fn page<S>(&self, source: &S) -> Result<Page<S::Item>, SourceError>
    where
        S: PageSource + ?Sized,
    {
        paginate(source, self.0).await
    }

    /// Fetches the requested page, overriding the page size.
    pub async fn page_with_size<S>(
        &self,
        source: &S,
        size: u64,
    ) -> Result<Page<S::Item>, SourceError>
    where
        S: PageSource + ?Sized,
    {
        paginate(source, self.0.with_size(size)).await
    }
}

/// Fetches an explicit page, ignoring the request.
pub async fn page_with<S>(source: &S, current: u64, size: u64) -> Result<Page<S::Item>, SourceError>
where
    S: PageSource + ?Sized,
{
    paginate(source, PageCursor::new(current, size)).await
}

impl<S> FromRequestParts<S> for Pagination
where
    PageConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = PageConfig::from_ref(state);
        let cursor = cursor_from_uri(&config, &parts.uri);

        tracing::debug!(page = cursor.current, size = cursor.size, "Page cursor");

        Ok(Pagination(cursor))
    }
}

/// A malformed query string is treated like an empty one.
fn cursor_from_uri(config: &PageConfig, uri: &Uri) -> PageCursor {
    let params = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map(|Query(params)| params)
        .unwrap_or_default();

    PageCursor::from_params(
        config,
        params.get(&config.page_key).map(String::as_str),
        params.get(&config.page_size_key).map(String::as_str),
    )
}
