use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token was issued to.
    pub sub: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
    /// Application-specific claims.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(sub: impl Into<String>, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            exp,
            extra: Map::new(),
        }
    }

    /// Adds an application-specific claim.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extra_claims_are_flattened() {
        let claims = Claims::new("user-1", 1_900_000_000).with("role", "admin");

        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            value,
            json!({ "sub": "user-1", "exp": 1_900_000_000_i64, "role": "admin" })
        );
    }

    #[test]
    fn test_unknown_claims_are_kept() {
        let claims: Claims =
            serde_json::from_value(json!({ "sub": "u", "exp": 1, "iss": "restkit" })).unwrap();

        assert_eq!(claims.extra.get("iss"), Some(&json!("restkit")));
    }
}
