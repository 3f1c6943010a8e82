//! Auth Routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Login/logout router (public)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/login", get(handler::login_form).post(handler::login))
        .route("/logout", get(handler::logout))
}
