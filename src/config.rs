// Endpoint configuration. The defaults point at the production services;
// the binary may override them through the environment.

use log::LevelFilter;

pub const DEFAULT_AUTH_URL: &str =
    "https://console.cloud.vmware.com/csp/gateway/am/api/auth/api-tokens/authorize";
pub const DEFAULT_API_BASE_URL: &str = "https://vmc.vmware.com/api/vmc-sizer/v5";

/// Where the client sends its requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizerConfig {
    /// Full URL of the refresh-token authorization endpoint.
    pub auth_url: String,
    /// Base of the sizer API; `/sizing/adapter/{type}` and `/recommendation`
    /// are appended to it.
    pub api_base_url: String,
}

impl Default for SizerConfig {
    fn default() -> Self {
        SizerConfig {
            auth_url: DEFAULT_AUTH_URL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl SizerConfig {
    /// Build a config pointing both endpoints at `base_url`, with the
    /// authorization endpoint mounted at `/authorize`. Mostly useful against
    /// a local mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        SizerConfig {
            auth_url: format!("{}/authorize", base),
            api_base_url: base.to_string(),
        }
    }

    /// Read `SIZER_AUTH_URL` and `SIZER_API_URL`, falling back to the
    /// production endpoints.
    pub fn from_env() -> Self {
        SizerConfig::from_overrides(
            std::env::var("SIZER_AUTH_URL").ok(),
            std::env::var("SIZER_API_URL").ok(),
        )
    }

    /// Apply optional endpoint overrides on top of the defaults.
    pub fn from_overrides(auth_url: Option<String>, api_base_url: Option<String>) -> Self {
        let defaults = SizerConfig::default();
        SizerConfig {
            auth_url: auth_url.unwrap_or(defaults.auth_url),
            api_base_url: api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
        }
    }

    pub(crate) fn adapter_url(&self, file_type: &str) -> String {
        format!("{}/sizing/adapter/{}", self.api_base_url, file_type)
    }

    pub(crate) fn recommendation_url(&self) -> String {
        format!("{}/recommendation", self.api_base_url)
    }
}

/// Log level for the binary, taken from `SIZER_LOG` (e.g. `debug`).
pub fn log_level_from_env() -> LevelFilter {
    parse_log_level(std::env::var("SIZER_LOG").ok().as_deref())
}

/// Unset or unparsable levels fall back to `Warn`.
pub fn parse_log_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}
