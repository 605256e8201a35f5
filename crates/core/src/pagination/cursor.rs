use serde::Serialize;

/// Default query parameter holding the 1-based page number.
pub const PAGE_KEY: &str = "page";

/// Default query parameter holding the page size.
pub const PAGE_SIZE_KEY: &str = "page_size";

/// Page size used when the request does not carry a usable one.
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Upper bound for client-requested page sizes.
pub const MAX_PAGE_SIZE: u64 = 100;

/// How page cursors are read from a request.
///
/// Immutable once the application starts; every request builds its own
/// [`PageCursor`] from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub page_key: String,
    pub page_size_key: String,
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_key: PAGE_KEY.to_string(),
            page_size_key: PAGE_SIZE_KEY.to_string(),
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Current page and page size for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub current: u64,
    pub size: u64,
}

impl PageCursor {
    /// Creates an explicit cursor. Both values are clamped to at least 1.
    pub fn new(current: u64, size: u64) -> Self {
        Self {
            current: current.max(1),
            size: size.max(1),
        }
    }

    /// Builds a cursor from raw query parameter values.
    ///
    /// - missing, unparsable or zero `page` -> 1
    /// - missing, unparsable or zero `page_size` -> `config.default_size`
    /// - `page_size` above `config.max_size` -> `config.max_size`
    pub fn from_params(config: &PageConfig, page: Option<&str>, page_size: Option<&str>) -> Self {
        let current = page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        let size = page_size
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(config.default_size)
            .min(config.max_size.max(1));

        Self::new(current, size)
    }

    /// Same page, different size.
    pub fn with_size(self, size: u64) -> Self {
        Self::new(self.current, size)
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        (self.current - 1).saturating_mul(self.size)
    }

    /// Number of rows to take.
    pub fn limit(&self) -> u64 {
        self.size
    }

    /// Number of pages needed to show `total` rows.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

/// One window of results plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Maps every item, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
