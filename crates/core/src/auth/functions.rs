use super::Claims;

const BEARER_PREFIX: &str = "Bearer ";

/// Picks the request token: the `Authorization` header first, then the
/// `token` query parameter. A `Bearer ` prefix is stripped and blank values
/// are ignored.
pub fn extract_token(authorization: Option<&str>, query_token: Option<&str>) -> Option<String> {
    let from_header = authorization
        .map(str::trim_start)
        .map(|h| strip_bearer(h).trim())
        .filter(|t| !t.is_empty());

    from_header
        .or_else(|| query_token.map(str::trim).filter(|t| !t.is_empty()))
        .map(str::to_string)
}

/// Strips the `Bearer ` scheme, matched case-insensitively.
fn strip_bearer(header: &str) -> &str {
    match header.get(..BEARER_PREFIX.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
            &header[BEARER_PREFIX.len()..]
        }
        _ => header,
    }
}

/// Check if the claims have expired at `now` (seconds since the epoch).
pub fn is_expired(claims: &Claims, now: i64) -> bool {
    claims.exp <= now
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_token_with_bearer_prefix() {
        assert_eq!(
            extract_token(Some("Bearer abc.def.ghi"), None),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        assert_eq!(
            extract_token(Some("bearer abc.def.ghi"), None),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(
            extract_token(Some("BEARER abc.def.ghi"), None),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_short_or_multibyte_header() {
        assert_eq!(extract_token(Some("abc"), None), Some("abc".to_string()));
        assert_eq!(extract_token(Some("Beaŕer x"), None), Some("Beaŕer x".to_string()));
    }

    #[test]
    fn test_raw_header_token() {
        assert_eq!(
            extract_token(Some("abc.def.ghi"), None),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_header_wins_over_query() {
        assert_eq!(
            extract_token(Some("Bearer from-header"), Some("from-query")),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn test_blank_header_falls_back_to_query() {
        assert_eq!(
            extract_token(Some("   "), Some("from-query")),
            Some("from-query".to_string())
        );
        assert_eq!(
            extract_token(Some("Bearer "), Some("from-query")),
            Some("from-query".to_string())
        );
    }

    #[test]
    fn test_no_token() {
        assert_eq!(extract_token(None, None), None);
        assert_eq!(extract_token(None, Some("")), None);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("u", 100);

        assert!(!is_expired(&claims, 99));
        assert!(is_expired(&claims, 100));
        assert!(is_expired(&claims, 101));
    }
}
