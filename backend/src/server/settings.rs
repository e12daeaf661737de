//! Process settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the listener, the record store and credential
/// verification.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHROMASCAPE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it records live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Web API key for the identity provider. Without it the static token
    /// table is used.
    pub firebase_api_key: Option<String>,
    /// Identity provider base URL override.
    pub identity_base_url: Option<String>,
    /// Timeout for identity provider lookups, in seconds.
    #[ortho_config(default = 10)]
    pub identity_timeout_secs: u64,
    /// Comma-separated `token=uid` pairs accepted when no API key is set.
    pub static_tokens: Option<String>,
}

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppSettings {
    /// Return the bind address, falling back to all interfaces on 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    /// Return the identity provider API key when one is configured and
    /// non-blank.
    pub fn firebase_api_key(&self) -> Option<&str> {
        non_blank(self.firebase_api_key.as_deref())
    }

    pub fn identity_base_url(&self) -> Option<&str> {
        non_blank(self.identity_base_url.as_deref())
    }

    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(self.identity_timeout_secs)
    }

    /// Split the static token list into `token=uid` entries.
    pub fn static_token_entries(&self) -> Vec<&str> {
        self.static_tokens
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
