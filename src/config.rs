//! Configuration module
//!
//! Loaded from a TOML file (default `~/.config/user-service/config.toml`).
//! Every section and field has a default, so a missing file or a partial
//! file is valid.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Role;

/// bcrypt ignores everything past this many password bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Default config location: `<config dir>/user-service/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("user-service")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
    /// Serve the OpenAPI document at `/api-doc/openapi.json`
    pub docs_enabled: bool,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
            docs_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. `info` or `user_service=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Realm advertised in `WWW-Authenticate`
    pub realm: String,
    pub bcrypt_cost: u32,
    pub accounts: Vec<AccountConfig>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            realm: "user-service".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            accounts: vec![
                AccountConfig {
                    username: "chathuranga".to_string(),
                    password: "123".to_string(),
                    roles: vec![Role::Admin, Role::User],
                },
                AccountConfig {
                    username: "user".to_string(),
                    password: "password".to_string(),
                    roles: vec![Role::User],
                },
            ],
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub username: String,
    pub password: String,
    pub roles: Vec<Role>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("roles", &self.roles)
            .finish()
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let security = &self.security;

        if !(4..=31).contains(&security.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost must be in 4..=31, got {}",
                security.bcrypt_cost
            )));
        }

        // Quoted into `WWW-Authenticate: Basic realm="..."`
        if security.realm.is_empty()
            || security
                .realm
                .chars()
                .any(|c| c == '"' || c == '\\' || c.is_control() || !c.is_ascii())
        {
            return Err(ConfigError::Invalid(format!(
                "security.realm must be non-empty printable ASCII without quotes or backslashes, got {:?}",
                security.realm
            )));
        }

        if security.accounts.is_empty() {
            return Err(ConfigError::Invalid(
                "security.accounts must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for account in &security.accounts {
            if account.username.is_empty() {
                return Err(ConfigError::Invalid("account username must not be empty".into()));
            }
            if account.roles.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "account '{}' has no roles",
                    account.username
                )));
            }
            if account.password.len() > MAX_PASSWORD_BYTES {
                return Err(ConfigError::Invalid(format!(
                    "password of account '{}' exceeds {} bytes",
                    account.username, MAX_PASSWORD_BYTES
                )));
            }
            if !seen.insert(account.username.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate account '{}'",
                    account.username
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.security.accounts.len(), 2);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.security.realm, "user-service");
    }

    #[test]
    fn accounts_parse_with_roles() {
        let config = AppConfig::from_toml(
            r#"
            [security]
            bcrypt_cost = 4

            [[security.accounts]]
            username = "root"
            password = "toor"
            roles = ["ROLE_ADMIN"]
            "#,
        )
        .unwrap();

        let accounts = &config.security.accounts;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].roles, vec![Role::Admin]);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_duplicate_and_roleless_accounts() {
        let mut config = AppConfig::default();
        config.security.accounts[1].username = "chathuranga".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.security.accounts[0].roles.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_bad_bcrypt_cost() {
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_realm_that_breaks_the_challenge_header() {
        for realm in ["", "user\"service", "a\\b", "line\nbreak", "caf\u{e9}"] {
            let mut config = AppConfig::default();
            config.security.realm = realm.into();
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "realm {realm:?} accepted"
            );
        }

        let mut config = AppConfig::default();
        config.security.realm = "Users API v1".into();
        config.validate().unwrap();
    }

    #[test]
    fn rejects_password_bcrypt_would_truncate() {
        let mut config = AppConfig::default();
        config.security.accounts[0].password = "x".repeat(MAX_PASSWORD_BYTES);
        config.validate().unwrap();

        config.security.accounts[0].password = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/user-service.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn debug_hides_passwords() {
        let config = AppConfig::default();
        assert!(!format!("{:?}", config.security.accounts).contains("\"123\""));
    }
}
