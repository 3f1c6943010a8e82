//! API 路由模块
//!
//! # 结构
//!
//! - [`auth`] - 登录/登出 (public)
//! - [`employees`] - 员工增删改查 (session required)
//! - stored pictures served by [`crate::uploads`] (public)

pub mod auth;
pub mod employees;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::require_session;
use crate::core::ServerState;

/// Assemble the full application router
pub fn build_router(state: ServerState) -> Router {
    let protected = employees::router().layer(middleware::from_fn_with_state(
        state.clone(),
        require_session,
    ));

    auth::router()
        .merge(crate::uploads::router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
