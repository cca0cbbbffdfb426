use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Public path prefix (and directory under the public root) for uploaded images.
pub const UPLOAD_ROUTE: &str = "schoolImages";

const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_MAX_CONNECTIONS: usize = 5;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_MAX_UPLOAD_MB: usize = 10;

/// Everything but RFC 3986 unreserved characters.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} env variable is not set")]
    Missing(&'static str),

    #[error("{key} env variable has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
}

impl DatabaseConfig {
    /// Connection URL with user and password percent-encoded.
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            utf8_percent_encode(&self.user, USERINFO),
            utf8_percent_encode(&self.password, USERINFO),
            self.host,
            self.port,
            self.database
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub bind_addr: SocketAddr,
    pub public_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let database = DatabaseConfig {
            host: required("MYSQL_HOST")?,
            user: required("MYSQL_USER")?,
            password: lookup("MYSQL_PASSWORD").unwrap_or_default(),
            database: required("MYSQL_DATABASE")?,
            port: parse_or(&lookup, "MYSQL_PORT", DEFAULT_MYSQL_PORT)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        };

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => parse("BIND_ADDR", value)?,
            None => parse("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
        };

        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        let max_upload_mb: usize = parse_or(&lookup, "MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?;

        Ok(Config {
            database,
            bind_addr,
            public_dir,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => parse(key, value),
        None => Ok(default),
    }
}
