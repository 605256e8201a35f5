//! Run mode of the host application.

use std::fmt;

/// Selects logging defaults the way a framework "mode" switch would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Debug,
    Release,
    Test,
}

impl AppMode {
    /// Parses a mode name. Empty and unknown names mean [`AppMode::Debug`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "release" => AppMode::Release,
            "test" => AppMode::Test,
            _ => AppMode::Debug,
        }
    }

    /// Tracing filter used when `RUST_LOG` is not set.
    ///
    /// Every mode keeps the `server_error` target at error level.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            AppMode::Debug => "restkit=debug,contacts=debug,tower_http=debug,server_error=error",
            AppMode::Release => "restkit=info,contacts=info,tower_http=info,server_error=error",
            AppMode::Test => "warn",
        }
    }

    /// Release mode logs JSON lines.
    pub fn json_logs(&self) -> bool {
        matches!(self, AppMode::Release)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Debug => write!(f, "debug"),
            AppMode::Release => write!(f, "release"),
            AppMode::Test => write!(f, "test"),
        }
    }
}
