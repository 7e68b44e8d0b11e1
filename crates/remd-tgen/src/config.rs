//! Client configuration loading and resolution.

/// Form endpoint of the REMD temperature generator.
pub const DEFAULT_URL: &str = "http://folding.bmc.uu.se/remd/tgenerator.php";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding the endpoint URL.
pub const URL_ENV: &str = "REMD_TGENERATOR_URL";

/// Environment variable overriding the request timeout, in milliseconds.
pub const TIMEOUT_ENV: &str = "REMD_TGENERATOR_TIMEOUT_MS";

/// Settings for [`crate::TemperatureClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("remd-tgen/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Configuration from explicit values, falling back to the environment
    /// and then to the built-in defaults.
    pub fn resolve(url: Option<&str>, timeout_ms: Option<u64>) -> Self {
        Self {
            url: resolve_endpoint_url(url),
            timeout_ms: resolve_timeout_ms(timeout_ms),
            ..Self::default()
        }
    }
}

/// Resolve the endpoint URL.
pub fn resolve_endpoint_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }

    if let Ok(env_url) = std::env::var(URL_ENV) {
        if !env_url.trim().is_empty() {
            return env_url;
        }
    }

    DEFAULT_URL.to_string()
}

/// Resolve the request timeout.
pub fn resolve_timeout_ms(explicit: Option<u64>) -> u64 {
    if let Some(ms) = explicit {
        return ms;
    }

    match std::env::var(TIMEOUT_ENV) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {TIMEOUT_ENV}={raw:?}");
            DEFAULT_TIMEOUT_MS
        }),
        Err(_) => DEFAULT_TIMEOUT_MS,
    }
}
