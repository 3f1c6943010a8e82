//! 认证中间件
//!
//! Per-request session guard for the protected routes. Each request
//! re-derives its session state from the `sid` cookie — no state is cached
//! between requests.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::SessionState;
use crate::core::ServerState;
use crate::utils::AppError;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "sid";

/// Authenticated admin identity, injected into request extensions by
/// [`require_session`]
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub String);

/// Extract the session token from the `Cookie` header
pub fn session_token(headers: &http::HeaderMap) -> Option<String> {
    let header = headers
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())?;

    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// 认证中间件 - 要求已登录会话
///
/// Anonymous requests are refused before any handler (and therefore before
/// any store access) and redirected to the login entry point.
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = match session_token(req.headers()) {
        Some(token) => state.sessions.lookup(&token),
        None => SessionState::Anonymous,
    };

    match session {
        SessionState::Authenticated(identity) => {
            req.extensions_mut().insert(CurrentAdmin(identity));
            Ok(next.run(req).await)
        }
        SessionState::Anonymous => {
            tracing::warn!(path = %req.uri().path(), "Anonymous access to protected route");
            Err(AppError::AuthRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, cookie.parse().unwrap());
        headers
    }

    #[test]
    fn test_session_token_parsing() {
        let headers = headers_with_cookie("sid=abc123");
        assert_eq!(session_token(&headers), Some("abc123".to_string()));

        let headers = headers_with_cookie("theme=dark; sid=tok; lang=en");
        assert_eq!(session_token(&headers), Some("tok".to_string()));

        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_no_cookie_header_yields_no_token() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
