use super::{Page, PageCursor, PageSource, Result};

/// Counts the source, then fetches the window described by `cursor`.
pub async fn paginate<S>(source: &S, cursor: PageCursor) -> Result<Page<S::Item>>
where
    S: PageSource + ?Sized,
{
    let total = source.count().await?;
    let items = source.fetch(cursor.offset(), cursor.limit()).await?;

    Ok(Page::new(items, total))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::pagination::SourceError;

    #[tokio::test]
    async fn test_first_page_of_vec() {
        let source: Vec<u32> = (1..=40).collect();

        let page = paginate(&source, PageCursor::new(1, 15)).await.unwrap();

        assert_eq!(page.total, 40);
        assert_eq!(page.items, (1..=15).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_last_partial_page() {
        let source: Vec<u32> = (1..=40).collect();

        let page = paginate(&source, PageCursor::new(3, 15)).await.unwrap();

        assert_eq!(page.items, (31..=40).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let source: Vec<u32> = (1..=5).collect();

        let page = paginate(&source, PageCursor::new(9, 10)).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    struct Broken;

    #[async_trait]
    impl PageSource for Broken {
        type Item = ();

        async fn count(&self) -> Result<u64> {
            Err(SourceError::ConnectionFailed("pool closed".to_string()))
        }

        async fn fetch(&self, _offset: u64, _limit: u64) -> Result<Vec<()>> {
            unreachable!("fetch must not run when count fails")
        }
    }

    #[tokio::test]
    async fn test_count_error_stops_pagination() {
        let result = paginate(&Broken, PageCursor::new(1, 10)).await;

        assert_eq!(
            result,
            Err(SourceError::ConnectionFailed("pool closed".to_string()))
        );
    }
}
