//! Server State
//!
//! [`ServerState`] 持有所有服务的共享引用，使用 Arc 实现浅拷贝。

use std::path::Path;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{CredentialVerifier, HashedVerifier, PlainVerifier, SessionStore};
use crate::core::{AuthMode, Config};
use crate::db::DbService;
use crate::uploads::UploadResolver;
use crate::utils::AppError;
use crate::views::{HtmlRenderer, ViewRenderer};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// In-process session table
    pub sessions: Arc<SessionStore>,
    /// Admin credential check (pluggable)
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Profile picture resolver
    pub uploads: Arc<UploadResolver>,
    /// View renderer
    pub renderer: Arc<dyn ViewRenderer>,
}

impl ServerState {
    /// Initialize state for the binary: open the on-disk database under the
    /// configured work dir.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let work_dir = Path::new(&config.work_dir);
        std::fs::create_dir_all(work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db_path = work_dir.join("directory.db");
        let service = DbService::open(&db_path.to_string_lossy()).await?;
        Self::with_db(config.clone(), service.db)
    }

    /// Assemble state around an existing database handle (tests use an
    /// in-memory database here).
    pub fn with_db(config: Config, db: Surreal<Db>) -> Result<Self, AppError> {
        let verifier = build_verifier(&config)?;
        let uploads = Arc::new(UploadResolver::new(
            Path::new(&config.work_dir),
            config.default_picture.clone(),
        )?);
        let sessions = Arc::new(SessionStore::new(config.session_ttl_minutes));

        Ok(Self {
            config,
            db,
            sessions,
            verifier,
            uploads,
            renderer: Arc::new(HtmlRenderer),
        })
    }
}

/// Select the credential verifier from configuration.
///
/// In hashed mode a plaintext `ADMIN_PASSWORD` is hashed once at startup;
/// an `$argon2...` value is used as-is.
fn build_verifier(config: &Config) -> Result<Arc<dyn CredentialVerifier>, AppError> {
    let verifier: Arc<dyn CredentialVerifier> = match config.auth_mode {
        AuthMode::Plain => Arc::new(PlainVerifier::new(
            &config.admin_email,
            &config.admin_password,
        )),
        AuthMode::Hashed => {
            if config.admin_password.starts_with("$argon2") {
                Arc::new(HashedVerifier::new(
                    &config.admin_email,
                    &config.admin_password,
                ))
            } else {
                Arc::new(HashedVerifier::from_plain(
                    &config.admin_email,
                    &config.admin_password,
                )?)
            }
        }
    };
    Ok(verifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_db_builds_configured_verifier() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.admin_email = "admin@example.com".into();
        config.admin_password = "hunter2".into();
        config.auth_mode = AuthMode::Hashed;

        let service = DbService::memory().await.unwrap();
        let state = ServerState::with_db(config, service.db).unwrap();

        assert!(state.verifier.verify("admin@example.com", "hunter2"));
        assert!(!state.verifier.verify("admin@example.com", "nope"));
        assert!(state.sessions.is_empty());
    }
}
