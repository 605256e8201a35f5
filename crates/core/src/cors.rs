//! Cross-origin policy decisions.
//!
//! [`CorsConfig::response_headers`] decides which `Access-Control-*`
//! headers a response gets; the middleware in `restkit::cors` only copies
//! them onto the response.

pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
pub const ALLOW_METHODS: &str = "access-control-allow-methods";
pub const EXPOSE_HEADERS: &str = "access-control-expose-headers";
pub const ALLOW_CREDENTIALS: &str = "access-control-allow-credentials";

const WILDCARD: &str = "*";

/// Cross-origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins. `*` allows every origin.
    pub allow_origins: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_methods: Vec<String>,
    /// Response headers readable by the client beyond the CORS-safelisted
    /// ones (Cache-Control, Content-Language, Content-Type, Expires,
    /// Last-Modified, Pragma).
    pub expose_headers: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: vec![WILDCARD.to_string()],
            allow_headers: to_strings(&[
                "Content-Type",
                "AccessToken",
                "X-CSRF-Token",
                "Authorization",
                "X-Requested-With",
            ]),
            allow_methods: to_strings(&["POST", "GET", "OPTIONS", "PUT", "PATCH", "DELETE"]),
            expose_headers: Vec::new(),
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Whether `origin` may talk to this server.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allow_origins
            .iter()
            .any(|allowed| allowed == WILDCARD || allowed == origin)
    }

    /// Headers to add to the response, or `None` when the origin is not allowed.
    ///
    /// A request without an `Origin` header is answered with `*`.
    pub fn response_headers(&self, origin: Option<&str>) -> Option<Vec<(&'static str, String)>> {
        let origin = origin.unwrap_or_default();
        if !self.allows_origin(origin) {
            return None;
        }

        let allow_origin = if origin.is_empty() { WILDCARD } else { origin };

        Some(vec![
            (ALLOW_ORIGIN, allow_origin.to_string()),
            (ALLOW_HEADERS, self.allow_headers.join(",")),
            (ALLOW_METHODS, self.allow_methods.join(",")),
            (EXPOSE_HEADERS, self.expose_headers.join(",")),
            (ALLOW_CREDENTIALS, self.allow_credentials.to_string()),
        ])
    }
}

/// Preflight requests are answered without reaching the handler.
pub fn is_preflight(method: &str) -> bool {
    method.eq_ignore_ascii_case("OPTIONS")
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
