//! Server configuration read from a TOML file.
//!
//! Every section is optional; missing keys fall back to the defaults below, so
//! running without `--config` serves on `127.0.0.1:8080` with the database and
//! lookup file in the working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::services::auth::password::is_password_hash;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_json_limit")]
    pub json_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            json_limit_bytes: default_json_limit(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_json_limit() -> usize {
    1024 * 1024
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("inventarium.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct LookupConfig {
    #[serde(default = "default_lookup_path")]
    pub path: PathBuf,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            path: default_lookup_path(),
        }
    }
}

fn default_lookup_path() -> PathBuf {
    PathBuf::from("data/region_structure.json")
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ModerationConfig {
    /// User identifiers seeded into the administrator set at startup. Each
    /// needs an entry in `auth.accounts` to be able to sign in.
    #[serde(default)]
    pub admins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// Set the `Secure` flag on the session cookie; enable behind HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            secure_cookie: false,
            accounts: Vec::new(),
        }
    }
}

fn default_session_ttl_hours() -> i64 {
    24 * 7
}

/// An account created or updated at startup. `password_hash` is an argon2
/// PHC string, as printed by `inventarium hash-password`.
#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub id: String,
    pub password_hash: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_queue_capacity() -> usize {
    100
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.reports.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "reports.queue_capacity must be > 0".to_string(),
            ));
        }
        if self.server.json_limit_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.json_limit_bytes must be > 0".to_string(),
            ));
        }
        if !(1..=24 * 365).contains(&self.auth.session_ttl_hours) {
            return Err(ConfigError::Invalid(
                "auth.session_ttl_hours must be between 1 and 8760".to_string(),
            ));
        }
        for account in &self.auth.accounts {
            if account.id.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "auth.accounts entries need a non-empty id".to_string(),
                ));
            }
            if !is_password_hash(&account.password_hash) {
                return Err(ConfigError::Invalid(format!(
                    "auth.accounts.{}: password_hash is not an argon2 PHC string",
                    account.id
                )));
            }
        }
        Ok(())
    }
}

/// Loads `path`, or the defaults when no path was given.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_toml("[server]\nport = 9090\n").unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.db.path, PathBuf::from("inventarium.sqlite"));
        assert_eq!(config.reports.queue_capacity, 100);
        assert!(config.moderation.admins.is_empty());
        assert_eq!(config.auth.session_ttl_hours, 168);
        assert!(config.auth.accounts.is_empty());
    }

    #[test]
    fn accounts_need_a_real_password_hash() {
        let err = Config::from_toml(
            "[[auth.accounts]]\nid = \"olena\"\npassword_hash = \"olena123\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let hash = crate::services::auth::password::hash_password("archive-1850").unwrap();
        let config = Config::from_toml(&format!(
            "[[auth.accounts]]\nid = \"olena\"\npassword_hash = \"{}\"\n",
            hash
        ))
        .unwrap();
        assert_eq!(config.auth.accounts[0].id, "olena");
    }

    #[test]
    fn session_lifetime_must_be_positive() {
        let err = Config::from_toml("[auth]\nsession_ttl_hours = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = Config::from_toml("[reports]\nqueue_capacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[moderation]\nadmins = [\"olena\"]").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.moderation.admins, vec!["olena".to_string()]);
    }

    #[test]
    fn no_path_means_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(matches!(
            load_config(Some(Path::new("/nonexistent/inventarium.toml"))),
            Err(ConfigError::Read { .. })
        ));
    }
}
