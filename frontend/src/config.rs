//! Build-time configuration.
//!
//! Nothing here is read at runtime: the API origin is fixed per build mode
//! and may be overridden when compiling with `DESYNC_API_BASE` set.

use std::time::Duration;

const DEV_API_BASE: &str = "http://localhost:5000/api";
const PROD_API_BASE: &str = "https://isolated-mellie-desynccheats-79e7a6ad.koyeb.app/api";

/// localStorage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

const CHAT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const SERVER_STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL every endpoint is joined to.
    pub api_base: String,
    pub token_key: &'static str,
    pub chat_poll_interval: Duration,
    pub server_status_poll_interval: Duration,
}

impl AppConfig {
    /// Configuration baked into this build.
    pub fn from_build() -> Self {
        let api_base = option_env!("DESYNC_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default_api_base(cfg!(debug_assertions)));
        Self::with_api_base(api_base)
    }

    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            token_key: TOKEN_STORAGE_KEY,
            chat_poll_interval: CHAT_POLL_INTERVAL,
            server_status_poll_interval: SERVER_STATUS_POLL_INTERVAL,
        }
    }
}

/// The origin selected by build mode.
pub fn default_api_base(debug_build: bool) -> &'static str {
    if debug_build { DEV_API_BASE } else { PROD_API_BASE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mode_selects_origin() {
        assert_eq!(default_api_base(true), "http://localhost:5000/api");
        assert!(default_api_base(false).starts_with("https://"));
    }

    #[test]
    fn test_explicit_base_keeps_defaults() {
        let config = AppConfig::with_api_base("http://api.test");
        assert_eq!(config.api_base, "http://api.test");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.chat_poll_interval, Duration::from_secs(5));
    }
}
