//! Connection settings assembled from the environment and config file.

use std::fmt;
use std::time::Duration;

use crate::bootstrap::connection::ConnectionError;
use crate::config::DatabaseConfig;

pub const ENV_DATABASE: &str = "MYSQL_database";
pub const ENV_USERNAME: &str = "MYSQL_username";
pub const ENV_PASSWORD: &str = "MYSQL_password";

/// Everything needed for one connection attempt.
///
/// Built once at startup and dropped after the attempt.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub charset: String,
    pub connect_timeout: Duration,
}

impl ConnectionConfig {
    /// Read credentials from the process environment.
    pub fn from_env(db: &DatabaseConfig) -> Result<Self, ConnectionError> {
        Self::from_lookup(db, |key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(db: &DatabaseConfig, lookup: F) -> Result<Self, ConnectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| lookup(key).ok_or(ConnectionError::MissingEnv(key));

        Ok(Self {
            host: db.host.clone(),
            port: db.port,
            database: require(ENV_DATABASE)?,
            username: require(ENV_USERNAME)?,
            // An empty password is legal in MySQL; an unset one is not.
            password: require(ENV_PASSWORD)?,
            charset: db.charset.clone(),
            connect_timeout: Duration::from_secs(db.connect_timeout_secs),
        })
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("charset", &self.charset)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
