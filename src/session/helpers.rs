//! Session resolution helpers

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use uuid::Uuid;

/// Header clients may use instead of the cookie
pub const SESSION_HEADER: &str = "x-session-id";
/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "storefront_session";

/// Returns the caller's session id and whether it was freshly issued.
///
/// Lookup order: `x-session-id` header, `storefront_session` cookie, new UUID.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    if let Some(id) = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return (id.to_string(), false);
    }

    if let Some(id) = session_from_cookies(headers) {
        return (id, false);
    }

    (get_or_create_session_id(None), true)
}

/// Returns the provided id or creates a new UUID string when `None`.
pub fn get_or_create_session_id(session_id: Option<String>) -> String {
    session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

fn session_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Adds a `Set-Cookie` header for a freshly issued session.
pub fn attach_session_cookie(response: &mut Response, session_id: &str, is_new: bool) {
    if !is_new {
        return;
    }

    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, session_id);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("abc"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("storefront_session=zzz"),
        );
        assert_eq!(resolve_session_id(&headers), ("abc".to_string(), false));
    }

    #[test]
    fn test_cookie_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; storefront_session=s-42"),
        );
        assert_eq!(resolve_session_id(&headers), ("s-42".to_string(), false));
    }

    #[test]
    fn test_new_session_issued() {
        let (id, is_new) = resolve_session_id(&HeaderMap::new());
        assert!(is_new);
        assert_eq!(id.len(), 32);
    }
}
