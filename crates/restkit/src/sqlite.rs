//! SQLite page source.

use std::marker::PhantomData;

use async_trait::async_trait;
use restkit_core::pagination::{PageSource, Result, SourceError};
use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

/// Pages over the rows of a `SELECT` statement.
///
/// The total comes from wrapping the statement in `SELECT COUNT(*)`; the
/// window is fetched by appending `LIMIT ? OFFSET ?`. The statement must not
/// carry its own `LIMIT` clause.
pub struct SqliteSource<T> {
    pool: SqlitePool,
    sql: String,
    binds: Vec<String>,
    _row: PhantomData<fn() -> T>,
}

impl<T> SqliteSource<T> {
    pub fn new(pool: SqlitePool, sql: impl Into<String>) -> Self {
        Self {
            pool,
            sql: sql.into(),
            binds: Vec::new(),
            _row: PhantomData,
        }
    }

    /// Binds the next `?` placeholder of the statement.
    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.binds.push(value.into());
        self
    }
}

impl<T> std::fmt::Debug for SqliteSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSource")
            .field("sql", &self.sql)
            .field("binds", &self.binds)
            .finish_non_exhaustive()
    }
}

fn source_error(err: sqlx::Error) -> SourceError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            SourceError::ConnectionFailed(err.to_string())
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => SourceError::InvalidRow(err.to_string()),
        _ => SourceError::QueryFailed(err.to_string()),
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl<T> PageSource for SqliteSource<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    type Item = T;

    async fn count(&self) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM ({}) AS paged", self.sql);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in &self.binds {
            query = query.bind(value.as_str());
        }

        let total = query.fetch_one(&self.pool).await.map_err(source_error)?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<T>> {
        let sql = format!("{} LIMIT ? OFFSET ?", self.sql);

        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in &self.binds {
            query = query.bind(value.as_str());
        }

        query
            .bind(to_i64(limit))
            .bind(to_i64(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(source_error)
    }
}

#[cfg(test)]
mod tests {
    use restkit_core::pagination::{paginate, PageCursor};
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn pool_with_rows(n: i64) -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query("CREATE TABLE items (id INTEGER PRIMARY KEY, kind TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();

        for id in 1..=n {
            let kind = if id % 2 == 0 { "even" } else { "odd" };
            sqlx::query("INSERT INTO items (id, kind) VALUES (?, ?)")
                .bind(id)
                .bind(kind)
                .execute(&pool)
                .await
                .unwrap();
        }

        pool
    }

    #[tokio::test]
    async fn test_pages_over_table() {
        let pool = pool_with_rows(12).await;
        let source = SqliteSource::<(i64, String)>::new(pool, "SELECT id, kind FROM items ORDER BY id");

        let page = paginate(&source, PageCursor::new(2, 5)).await.unwrap();

        assert_eq!(page.total, 12);
        let ids: Vec<i64> = page.items.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn test_binds_apply_to_count_and_fetch() {
        let pool = pool_with_rows(9).await;
        let source = SqliteSource::<(i64, String)>::new(
            pool,
            "SELECT id, kind FROM items WHERE kind = ? ORDER BY id",
        )
        .bind("even");

        let page = paginate(&source, PageCursor::new(1, 3)).await.unwrap();

        assert_eq!(page.total, 4);
        let ids: Vec<i64> = page.items.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn test_bad_statement_is_query_failure() {
        let pool = pool_with_rows(1).await;
        let source = SqliteSource::<(i64,)>::new(pool, "SELECT id FROM missing_table");

        let result = paginate(&source, PageCursor::new(1, 10)).await;

        assert!(matches!(result, Err(SourceError::QueryFailed(_))));
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_failure() {
        let pool = pool_with_rows(1).await;
        pool.close().await;
        let source = SqliteSource::<(i64,)>::new(pool, "SELECT id FROM items");

        let result = source.count().await;

        assert!(matches!(result, Err(SourceError::ConnectionFailed(_))));
    }
}
