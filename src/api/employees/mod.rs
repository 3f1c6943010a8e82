//! Employee Routes
//!
//! The whole surface is session-gated (the guard is layered on by the
//! top-level router). `/update/{id}` also answers GET with the edit form,
//! and `/delete/{id}` accepts both methods, matching the links the views
//! emit.

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::get, routing::post};

use crate::core::ServerState;

/// Upload body ceiling: picture cap plus form overhead
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Employee CRUD router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/dashboard", get(handler::list))
        .route("/profile/{id}", get(handler::profile))
        .route("/edit/{id}", get(handler::edit_form))
        .route("/add", post(handler::create))
        .route("/update/{id}", get(handler::edit_form).post(handler::update))
        .route("/delete/{id}", get(handler::delete).post(handler::delete))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
