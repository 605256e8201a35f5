use async_trait::async_trait;

use super::Result;

/// Anything that can count its rows and hand back a window of them.
///
/// Database-backed implementations live in the shell crate; the in-memory
/// one below is mostly useful for tests and fixtures.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Total number of rows the source would return without a window.
    async fn count(&self) -> Result<u64>;

    /// Rows `offset..offset + limit`.
    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Self::Item>>;
}

#[async_trait]
impl<T> PageSource for Vec<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;

    async fn count(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }

    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<T>> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self.iter().skip(start).take(take).cloned().collect())
    }
}
