use std::{env, time::Duration};

use restkit::{AppMode, CorsConfig, PageConfig};

/// Secret used when `JWT_SECRET` is not set. Only fit for local development.
pub const DEV_JWT_SECRET: &str = "restkit-dev-secret";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Run mode (default: debug)
    pub mode: AppMode,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// SQLite connection URL (default: "sqlite::memory:")
    pub database_url: String,
    /// Page cursor parsing rules
    pub page: PageConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `APP_MODE` - `debug`, `release` or `test` (default: debug)
    /// - `JWT_SECRET` - token signing secret (default: development secret)
    /// - `DATABASE_URL` - SQLite URL (default: "sqlite::memory:")
    /// - `PAGE_SIZE_DEFAULT` - page size when the request has none (default: 15)
    /// - `PAGE_SIZE_MAX` - largest page size a client may ask for (default: 100)
    /// - `CORS_ALLOW_ORIGINS`, `CORS_ALLOW_HEADERS`, `CORS_ALLOW_METHODS`,
    ///   `CORS_EXPOSE_HEADERS` - comma separated lists
    /// - `CORS_ALLOW_CREDENTIALS` - `true` or `false` (default: false)
    /// - `REQUEST_TIMEOUT_SECS` - request timeout (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparsable values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let list = |key: &str, default: Vec<String>| {
            lookup(key)
                .map(|v| parse_list(&v))
                .filter(|items| !items.is_empty())
                .unwrap_or(default)
        };

        let page_defaults = PageConfig::default();
        let max_size = parsed("PAGE_SIZE_MAX")
            .filter(|v| *v > 0)
            .unwrap_or(page_defaults.max_size);
        let default_size = parsed("PAGE_SIZE_DEFAULT")
            .filter(|v| *v > 0)
            .unwrap_or(page_defaults.default_size)
            .min(max_size);

        let cors_defaults = CorsConfig::default();

        Self {
            mode: AppMode::parse(&lookup("APP_MODE").unwrap_or_default()),
            jwt_secret: lookup("JWT_SECRET")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "sqlite::memory:".to_string()),
            page: PageConfig {
                default_size,
                max_size,
                ..page_defaults
            },
            cors: CorsConfig {
                allow_origins: list("CORS_ALLOW_ORIGINS", cors_defaults.allow_origins),
                allow_headers: list("CORS_ALLOW_HEADERS", cors_defaults.allow_headers),
                allow_methods: list("CORS_ALLOW_METHODS", cors_defaults.allow_methods),
                expose_headers: list("CORS_EXPOSE_HEADERS", cors_defaults.expose_headers),
                allow_credentials: lookup("CORS_ALLOW_CREDENTIALS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(cors_defaults.allow_credentials),
            },
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS")
                .filter(|v| *v > 0)
                .unwrap_or(10),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Splits a comma separated list, dropping blank items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
