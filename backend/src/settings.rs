//! Process configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `AUTH_*` environment variables over config
//! files. Everything except the signing secret has a default, and the
//! database URL may be given whole or as parts.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BCRYPT_COST: u32 = 12;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_NAME: &str = "accounts";
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Configuration problems detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `AUTH_SECRET` is unset or blank.
    #[error("AUTH_SECRET must be set to a non-empty value")]
    MissingSecret,
    /// The database URL parts do not form a valid URL.
    #[error("invalid database url: {message}")]
    DatabaseUrl { message: String },
}

/// Settings for the accounts server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AUTH")]
pub struct AppSettings {
    /// HMAC secret used to sign and verify access tokens.
    pub secret: Option<String>,
    /// Full PostgreSQL connection URL; takes precedence over the parts.
    pub database_url: Option<String>,
    /// Database user.
    pub db_user: Option<String>,
    /// Database password.
    pub db_pass: Option<String>,
    /// Database host, `localhost` when omitted.
    pub db_host: Option<String>,
    /// Database name, `accounts` when omitted.
    pub db_name: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Bind host.
    pub host: Option<String>,
    /// Bind port.
    pub port: Option<u16>,
    /// Bcrypt cost factor.
    pub bcrypt_cost: Option<u32>,
    /// Token lifetime in seconds; tokens never expire when unset.
    pub token_ttl_secs: Option<u64>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppSettings")
            .field("secret", &redact(&self.secret))
            .field("database_url", &redact(&self.database_url))
            .field("db_user", &self.db_user)
            .field("db_pass", &redact(&self.db_pass))
            .field("db_host", &self.db_host)
            .field("db_name", &self.db_name)
            .field("db_pool_size", &self.db_pool_size)
            .field("db_connect_timeout_secs", &self.db_connect_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl AppSettings {
    /// Return the signing secret.
    ///
    /// # Errors
    /// [`SettingsError::MissingSecret`] when the secret is unset or blank.
    pub fn secret(&self) -> Result<&str, SettingsError> {
        self.secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(SettingsError::MissingSecret)
    }

    /// Resolve the database URL.
    ///
    /// A full URL wins. Otherwise a URL is assembled from the parts once a
    /// database user is configured. `None` selects the in-memory store.
    ///
    /// # Errors
    /// [`SettingsError::DatabaseUrl`] when the parts cannot form a URL.
    pub fn database_url(&self) -> Result<Option<String>, SettingsError> {
        if let Some(url) = non_blank(self.database_url.as_ref()) {
            return Ok(Some(url.to_owned()));
        }
        let Some(user) = non_blank(self.db_user.as_ref()) else {
            return Ok(None);
        };

        let host = non_blank(self.db_host.as_ref()).unwrap_or(DEFAULT_DB_HOST);
        let name = non_blank(self.db_name.as_ref()).unwrap_or(DEFAULT_DB_NAME);
        let mut url = Url::parse(&format!("postgres://{host}/{name}")).map_err(|err| {
            SettingsError::DatabaseUrl {
                message: err.to_string(),
            }
        })?;
        let rejected = || SettingsError::DatabaseUrl {
            message: "url cannot carry credentials".to_owned(),
        };
        url.set_username(user).map_err(|()| rejected())?;
        url.set_password(self.db_pass.as_deref())
            .map_err(|()| rejected())?;
        Ok(Some(url.into()))
    }

    /// Maximum pooled database connections, 10 by default.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Pool checkout timeout, 30 seconds by default.
    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connect_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Bind host, `0.0.0.0` by default.
    pub fn host(&self) -> &str {
        non_blank(self.host.as_ref()).unwrap_or(DEFAULT_HOST)
    }

    /// Bind port, 3000 by default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Bcrypt cost factor, 12 by default.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Token lifetime; `None` issues tokens without an expiry.
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_secs.map(Duration::from_secs)
    }
}
