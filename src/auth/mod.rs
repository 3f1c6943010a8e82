//! 认证授权模块
//!
//! Session gate with two states (`Anonymous` / `Authenticated`) and a
//! pluggable credential check:
//! - [`SessionStore`] - in-process session table, cookie token keyed
//! - [`CredentialVerifier`] - one-method verification seam
//! - [`require_session`] - per-request guard middleware

pub mod credentials;
pub mod middleware;
pub mod session;

pub use credentials::{CredentialVerifier, HashedVerifier, PlainVerifier};
pub use middleware::{CurrentAdmin, require_session, session_token};
pub use session::{SessionState, SessionStore};
