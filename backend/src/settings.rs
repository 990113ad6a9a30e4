//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ROTEIRO_*` environment variables or a
//! configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::auth::TokenLifetimes;
use crate::outbound::gemini::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TIMEOUT, GeminiConfig,
};
use crate::outbound::persistence::PoolSizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ACCESS_TOKEN_TTL_HOURS: u32 = 24;
const DEFAULT_REFRESH_TOKEN_TTL_DAYS: u32 = 7;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DATABASE_CHECKOUT_TIMEOUT_SECS: u64 = 30;
/// A zero timeout would fail every generation request instantly.
const MIN_GEMINI_TIMEOUT_SECS: u64 = 1;

/// Invalid setting values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid Gemini endpoint {value:?}: {source}")]
    GeminiEndpoint {
        value: String,
        source: url::ParseError,
    },
}

/// Runtime configuration for the HTTP server.
///
/// Every field either has a default or is optional, so the server starts
/// with no configuration at all.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROTEIRO")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL URL. Without it the server runs on fixture data.
    pub database_url: Option<String>,
    #[ortho_config(default = DEFAULT_DATABASE_MAX_CONNECTIONS)]
    pub database_max_connections: u32,
    #[ortho_config(default = DEFAULT_DATABASE_CHECKOUT_TIMEOUT_SECS)]
    pub database_checkout_timeout_secs: u64,
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: Option<String>,
    #[ortho_config(default = DEFAULT_ACCESS_TOKEN_TTL_HOURS)]
    pub access_token_ttl_hours: u32,
    #[ortho_config(default = DEFAULT_REFRESH_TOKEN_TTL_DAYS)]
    pub refresh_token_ttl_days: u32,
    /// Gemini API key. Itinerary requests fail while it is unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_endpoint: Option<String>,
    #[ortho_config(default = DEFAULT_GEMINI_TIMEOUT.as_secs())]
    pub gemini_timeout_secs: u64,
}

impl AppSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.trim();
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Connection pool limits. At least one connection is always allowed.
    pub fn pool_sizing(&self) -> PoolSizing {
        PoolSizing {
            max_connections: self.database_max_connections.max(1),
            checkout_timeout: Duration::from_secs(self.database_checkout_timeout_secs),
        }
    }

    /// Token signing secret, ignoring blank values.
    pub fn jwt_secret(&self) -> Option<&str> {
        non_blank(self.jwt_secret.as_deref())
    }

    pub fn token_lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes {
            access: chrono::Duration::hours(i64::from(self.access_token_ttl_hours)),
            refresh: chrono::Duration::days(i64::from(self.refresh_token_ttl_days)),
        }
    }

    /// Assemble the Gemini adapter settings.
    ///
    /// The timeout is raised to one second when configured lower.
    pub fn gemini_config(&self) -> Result<GeminiConfig, SettingsError> {
        let endpoint_text = non_blank(self.gemini_endpoint.as_deref())
            .unwrap_or(DEFAULT_GEMINI_ENDPOINT);
        let endpoint =
            Url::parse(endpoint_text).map_err(|source| SettingsError::GeminiEndpoint {
                value: endpoint_text.to_owned(),
                source,
            })?;
        Ok(GeminiConfig {
            api_key: non_blank(self.gemini_api_key.as_deref()).map(str::to_owned),
            model: non_blank(self.gemini_model.as_deref())
                .unwrap_or(DEFAULT_GEMINI_MODEL)
                .to_owned(),
            endpoint,
            timeout: Duration::from_secs(self.gemini_timeout_secs.max(MIN_GEMINI_TIMEOUT_SECS)),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
