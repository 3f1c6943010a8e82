//! 统一错误处理
//!
//! Application-level error taxonomy, resolved entirely at the handler
//! boundary — nothing propagates past the HTTP response:
//!
//! | Variant | Outcome |
//! |---------|---------|
//! | `NotFound` | 404 page |
//! | `AuthRequired` | redirect to `/login` |
//! | `Validation` | 400 |
//! | `Database` | 500 (logged, never retried) |
//! | `Internal` | 500 (logged) |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::db::repository::RepoError;

/// Application-level Result type used in HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Protected route hit without a live session (redirect, not an error page)
    #[error("Authentication required")]
    AuthRequired,

    /// 无效请求 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // Anonymous access to a protected route: send the user to the
            // login form instead of an error page.
            AppError::AuthRequired => return Redirect::to("/login").into_response(),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let err: AppError = RepoError::NotFound("employee x".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = RepoError::Database("connection refused".into()).into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
