//! Server Configuration
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/staffdir | 工作目录 (database, uploads) |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | ENVIRONMENT | development | 运行环境 |
//! | ADMIN_EMAIL | admin@example.com | 管理员邮箱 |
//! | ADMIN_PASSWORD | admin123 | 管理员密码 (plain 模式为明文; hashed 模式为明文或 argon2 哈希) |
//! | AUTH_MODE | plain | 凭证比较方式: plain \| hashed |
//! | DEFAULT_PICTURE | default.png | 无上传时的头像占位文件名 |
//! | UPDATE_CLEARS_ON_EMPTY | false | 更新时空字段是否清除属性 |
//! | SESSION_TTL_MINUTES | 1440 | 会话有效期 (分钟) |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/staffdir HTTP_PORT=8080 cargo run
//! ```

/// How the single admin secret is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Direct plaintext comparison
    Plain,
    /// Argon2 salted-hash comparison
    Hashed,
}

impl AuthMode {
    fn from_env() -> Self {
        match std::env::var("AUTH_MODE").as_deref() {
            Ok("hashed") => AuthMode::Hashed,
            _ => AuthMode::Plain,
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和上传文件
    pub work_dir: String,
    /// HTTP 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// The one configured admin identity
    pub admin_email: String,
    /// The admin secret — plaintext, or an argon2 hash in hashed mode
    pub admin_password: String,
    /// Credential comparison mode
    pub auth_mode: AuthMode,
    /// Sentinel picture filename used when no upload is supplied on create
    pub default_picture: String,
    /// Whether an explicitly-empty form value clears the stored attribute
    pub update_clears_on_empty: bool,
    /// 会话有效期 (分钟)
    pub session_ttl_minutes: i64,
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/staffdir".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
            auth_mode: AuthMode::from_env(),
            default_picture: std::env::var("DEFAULT_PICTURE")
                .unwrap_or_else(|_| "default.png".into()),
            update_clears_on_empty: std::env::var("UPDATE_CLEARS_ON_EMPTY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1440),
        }
    }

    /// 使用自定义值覆盖部分配置，常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides("/tmp/staffdir-test", 0);
        assert_eq!(config.work_dir, "/tmp/staffdir-test");
        assert_eq!(config.http_port, 0);
        assert_eq!(config.default_picture, "default.png");
        assert!(!config.update_clears_on_empty);
    }
}
