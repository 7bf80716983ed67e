//! Gateway configuration, read from the environment at startup.

use std::env;
use std::time::Duration;

/// Which collaborator set the gateway runs with. `Stub` keeps everything
/// in-process and deterministic; `Http` talks to the real services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Http,
    Stub,
}

impl GatewayMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "http" => Some(GatewayMode::Http),
            "stub" => Some(GatewayMode::Stub),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_addr: String,
    pub mode: GatewayMode,
    pub search_url: String,
    pub profile_url: String,
    pub embedding_url: String,
    pub translate_url: String,
    pub request_timeout: Duration,
    pub k: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            listen_addr: "127.0.0.1:8000".to_string(),
            mode: GatewayMode::Stub,
            // In-cluster DNS names from the original deployment.
            search_url: "http://palate-search:8001".to_string(),
            profile_url: "http://profile-service:8003".to_string(),
            embedding_url: "http://embedding-service:8004".to_string(),
            translate_url: "http://translate-service:8002".to_string(),
            request_timeout: Duration::from_secs(30),
            k: 5,
        }
    }
}

impl GatewayConfig {
    /// Reads the config from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = GatewayConfig::default();
        GatewayConfig {
            listen_addr: env::var("PALATE_GATEWAY_ADDR").unwrap_or(defaults.listen_addr),
            mode: env::var("PALATE_GATEWAY_MODE")
                .ok()
                .and_then(|v| GatewayMode::parse(&v))
                .unwrap_or(defaults.mode),
            search_url: env::var("PALATE_SEARCH_URL").unwrap_or(defaults.search_url),
            profile_url: env::var("PALATE_PROFILE_URL").unwrap_or(defaults.profile_url),
            embedding_url: env::var("PALATE_EMBEDDING_URL").unwrap_or(defaults.embedding_url),
            translate_url: env::var("PALATE_TRANSLATE_URL").unwrap_or(defaults.translate_url),
            request_timeout: env::var("PALATE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            k: env::var("PALATE_SEARCH_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|k| *k > 0)
                .unwrap_or(defaults.k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(GatewayMode::parse("http"), Some(GatewayMode::Http));
        assert_eq!(GatewayMode::parse("STUB"), Some(GatewayMode::Stub));
        assert_eq!(GatewayMode::parse("real"), None);
    }
}
