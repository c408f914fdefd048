//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read a `.env` at runtime, so endpoints and the auth
//! strategy are baked in from the build environment via `option_env!`.
//! Unknown values fall back to defaults with a console warning.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use authflow::status::{AuthEndpoints, PlaceholderPolicy};
use authflow::strategy::AuthStrategy;

/// Hosted backend serving both the auth and the analysis endpoints.
pub const DEFAULT_API_BASE: &str = "https://endearing-prosperity-production.up.railway.app";

/// Composition-time settings shared through context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub analysis_base: String,
    pub strategy: AuthStrategy,
    pub placeholder: PlaceholderPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None)
    }
}

impl ClientConfig {
    /// Read `VIVARAN_API_BASE`, `VIVARAN_ANALYSIS_BASE`,
    /// `VIVARAN_AUTH_STRATEGY` and `VIVARAN_PLACEHOLDER_USER` as set at build time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("VIVARAN_API_BASE"),
            option_env!("VIVARAN_ANALYSIS_BASE"),
            option_env!("VIVARAN_AUTH_STRATEGY"),
            option_env!("VIVARAN_PLACEHOLDER_USER"),
        )
    }

    #[must_use]
    pub fn from_values(
        api_base: Option<&str>,
        analysis_base: Option<&str>,
        strategy: Option<&str>,
        placeholder: Option<&str>,
    ) -> Self {
        let api_base = non_empty(api_base).unwrap_or(DEFAULT_API_BASE).trim_end_matches('/').to_owned();
        let analysis_base = non_empty(analysis_base)
            .map_or_else(|| api_base.clone(), |base| base.trim_end_matches('/').to_owned());
        let strategy = match non_empty(strategy) {
            None => AuthStrategy::default(),
            Some(raw) => AuthStrategy::parse(raw).unwrap_or_else(|| {
                leptos::logging::warn!("unknown VIVARAN_AUTH_STRATEGY {raw:?}, using oauth");
                AuthStrategy::default()
            }),
        };
        let placeholder = match non_empty(placeholder) {
            None => PlaceholderPolicy::default(),
            Some(raw) => PlaceholderPolicy::parse(raw).unwrap_or_else(|| {
                leptos::logging::warn!("unknown VIVARAN_PLACEHOLDER_USER {raw:?}, using synthesize");
                PlaceholderPolicy::default()
            }),
        };
        Self { api_base, analysis_base, strategy, placeholder }
    }

    #[must_use]
    pub fn auth_endpoints(&self) -> AuthEndpoints {
        AuthEndpoints::new(&self.api_base)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
