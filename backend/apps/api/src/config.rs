//! Application Configuration
//!
//! Read once at startup from the environment into an immutable
//! [`AppConfig`]. `START` names a dotenv file that must load; without it a
//! `.env` in the working directory is loaded when present.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use auth::AuthConfig;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8082";
pub const DEFAULT_STATIC_DIR: &str = "./static";
pub const DEFAULT_MYSQL_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Loads the dotenv file. Returns the path that was loaded, if any.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    match env::var("START") {
        Ok(path) if !path.is_empty() => dotenvy::from_filename(&path)
            .map(Some)
            .map_err(|source| ConfigError::EnvFile { path, source }),
        _ => Ok(dotenvy::dotenv().ok()),
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub mysql_dsn: String,
    pub mongo_uri: String,
    pub mongo_db_name: String,
    pub listen_addr: SocketAddr,
    pub static_dir: PathBuf,
    /// CORS is only installed when non-empty.
    pub frontend_origins: Vec<String>,
    pub mysql_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let listen_addr = optional("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "LISTEN_ADDR",
                reason: e.to_string(),
            })?;

        let mysql_max_connections = match optional("MYSQL_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "MYSQL_MAX_CONNECTIONS",
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_MYSQL_MAX_CONNECTIONS,
        };

        let frontend_origins = optional("FRONTEND_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            jwt_secret: required("JWT_SECRET")?,
            mysql_dsn: required("MYSQL_DSN")?,
            mongo_uri: required("MONGO_URI")?,
            mongo_db_name: required("MONGO_DB_NAME")?,
            listen_addr,
            static_dir: optional("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            frontend_origins,
            mysql_max_connections,
        })
    }

    /// Token and session settings for the auth crate.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(self.jwt_secret.as_bytes())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("mysql_dsn", &"[REDACTED]")
            .field("mongo_uri", &"[REDACTED]")
            .field("mongo_db_name", &self.mongo_db_name)
            .field("listen_addr", &self.listen_addr)
            .field("static_dir", &self.static_dir)
            .field("frontend_origins", &self.frontend_origins)
            .field("mysql_max_connections", &self.mysql_max_connections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("JWT_SECRET", "secret"),
        ("MYSQL_DSN", "mysql://u:p@localhost/db"),
        ("MONGO_URI", "mongodb://localhost:27017"),
        ("MONGO_DB_NAME", "linkboard"),
    ];

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.listen_addr.port(), 8082);
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert!(config.frontend_origins.is_empty());
        assert_eq!(config.mysql_max_connections, 5);
        assert_eq!(config.auth_config().jwt_secret, b"secret".to_vec());
    }

    #[test]
    fn every_required_variable_is_checked() {
        for (missing, _) in REQUIRED {
            let rest: Vec<_> = REQUIRED.iter().copied().filter(|(k, _)| *k != missing).collect();
            match AppConfig::from_lookup(lookup(&rest)) {
                Err(ConfigError::Missing(name)) => assert_eq!(name, missing),
                other => panic!("expected {missing} to be missing, got {other:?}"),
            }
        }
    }

    #[test]
    fn optional_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("LISTEN_ADDR", "127.0.0.1:9000"));
        vars.push(("FRONTEND_ORIGINS", "http://a.test, http://b.test,"));
        vars.push(("MYSQL_MAX_CONNECTIONS", "12"));
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.frontend_origins, ["http://a.test", "http://b.test"]);
        assert_eq!(config.mysql_max_connections, 12);

        vars.push(("MYSQL_MAX_CONNECTIONS", "many"));
        let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MYSQL_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("\"secret\""));
        assert!(!debug.contains("mysql://"));
    }
}
