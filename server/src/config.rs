//! Server configuration parsed from environment variables.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PROXY_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Generation backend that `/api/*` is forwarded to, without trailing slash.
    pub api_base_url: String,
    pub port: u16,
    pub proxy_timeout_secs: u64,
    pub proxy_connect_timeout_secs: u64,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `FORGEFLOW_API_BASE_URL`: default `http://localhost:8000`
    /// - `PORT`: default 3000
    /// - `FORGEFLOW_PROXY_TIMEOUT_SECS`: default 120 (generation is slow)
    /// - `FORGEFLOW_PROXY_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("FORGEFLOW_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();

        Self {
            api_base_url,
            port: env_parse("PORT", DEFAULT_PORT),
            proxy_timeout_secs: env_parse("FORGEFLOW_PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS),
            proxy_connect_timeout_secs: env_parse(
                "FORGEFLOW_PROXY_CONNECT_TIMEOUT_SECS",
                DEFAULT_PROXY_CONNECT_TIMEOUT_SECS,
            ),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
