//! HTTP server configuration object.

use accounts_backend::AppSettings;

/// Listener settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

impl ServerConfig {
    /// Construct a server configuration for `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Take the bind address from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.host(), settings.port())
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}
