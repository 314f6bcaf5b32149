use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::error::ConfigError;
use crate::models::Handle;

pub const DEFAULT_API_BASE_URL: &str = "https://codeforces.com/api";
const DEFAULT_PIN_STORE_PATH: &str = "pins.json";
const DEFAULT_PORT: u16 = 3000;

/// Credentials and endpoint for the Codeforces API.
#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    /// The user's own handles, shown above the friends list.
    pub self_handles: Vec<Handle>,
    pub pin_store_path: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = var("CF_API_BASE_URL").unwrap_or_else(|| {
            info!("CF_API_BASE_URL not set, using default: {DEFAULT_API_BASE_URL}");
            DEFAULT_API_BASE_URL.to_string()
        });
        let api_key = var("CF_API_KEY").ok_or(ConfigError::Missing("CF_API_KEY"))?;
        let api_secret = var("CF_API_SECRET").ok_or(ConfigError::Missing("CF_API_SECRET"))?;

        let self_handles = var("CF_SELF_HANDLES")
            .map(|raw| parse_handles(&raw))
            .unwrap_or_default();

        let pin_store_path = var("PIN_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PIN_STORE_PATH));

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.trim().to_string(),
                api_secret: api_secret.trim().to_string(),
            },
            self_handles,
            pin_store_path,
            port,
        })
    }
}

/// Splits on `;` or `,`, dropping blanks.
pub fn parse_handles(raw: &str) -> Vec<Handle> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}
