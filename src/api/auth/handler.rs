//! Auth Handlers
//!
//! Login establishes a server-side session and sets the cookie; a rejected
//! pair re-renders the login form with a message and leaves the state
//! untouched. Logout is best-effort: whatever happens to the stored
//! session, the user ends up logged out and redirected.

use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use http::{HeaderMap, HeaderValue, header};
use serde::Deserialize;
use serde_json::json;

use crate::auth::middleware::{SESSION_COOKIE, session_token};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Show the login form
pub async fn login_form(State(state): State<ServerState>) -> AppResult<Html<String>> {
    let html = state.renderer.render("login", &json!({}))?;
    Ok(Html(html))
}

/// Authenticate the submitted pair against the configured admin identity
pub async fn login(
    State(state): State<ServerState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if !state.verifier.verify(&form.email, &form.password) {
        tracing::warn!(email = %form.email, "Login failed - invalid credentials");
        let html = state
            .renderer
            .render("login", &json!({"error": "Invalid credentials"}))?;
        return Ok(Html(html).into_response());
    }

    let token = state.sessions.create(&form.email);
    tracing::info!(email = %form.email, "Admin logged in");

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie value: {e}")))?,
    );
    Ok(response)
}

/// End the session and clear the cookie
pub async fn logout(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers)
        && !state.sessions.destroy(&token)
    {
        // Session already gone; the user still ends up logged out.
        tracing::warn!("Logout for a session that no longer exists");
    }

    let mut response = Redirect::to("/login").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("sid=; Path=/; Max-Age=0"),
    );
    response
}
