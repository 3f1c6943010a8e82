//! Staff Directory Server
//!
//! A small employee-directory web application: server-rendered CRUD views
//! over an embedded document store, a single-admin session gate, and
//! profile-picture uploads.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # Session gate + credential verification
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded SurrealDB storage
//! ├── uploads/       # Profile picture resolver
//! ├── views/         # Server-side HTML rendering
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod uploads;
pub mod utils;
pub mod views;

// Re-export 公共类型
pub use auth::{CredentialVerifier, SessionState, SessionStore};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};
