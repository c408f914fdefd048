//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use axum::http::HeaderValue;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}")]
    InvalidPort { value: String },
    #[error("invalid VIVARAN_CORS_ORIGIN {value:?}")]
    InvalidCorsOrigin { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Overrides the Leptos `site-root` (where `/pkg` is served from).
    pub site_root: Option<PathBuf>,
    /// Origin allowed to call the server cross-site; no CORS layer when unset.
    pub cors_origin: Option<HeaderValue>,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `VIVARAN_SITE_ROOT`: Leptos site root override
    /// - `VIVARAN_CORS_ORIGIN`: single allowed origin
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort { value: raw })?,
        };
        let site_root = var("VIVARAN_SITE_ROOT").map(PathBuf::from);
        let cors_origin = match var("VIVARAN_CORS_ORIGIN") {
            None => None,
            Some(raw) => Some(
                HeaderValue::from_str(raw.trim_end_matches('/'))
                    .map_err(|_| ConfigError::InvalidCorsOrigin { value: raw })?,
            ),
        };

        Ok(Self { port, site_root, cors_origin })
    }
}
