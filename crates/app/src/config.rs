use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;

/// Variables consulted for the API base URL, first non-blank wins.
pub const API_BASE_URL_VARS: [&str; 3] = [
    "VOCAB_API_BASE_URL",
    "INTERNAL_API_BASE_URL",
    "NEXT_PUBLIC_API_BASE_URL",
];

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid bind address {raw:?}")]
    InvalidBind { raw: String },
    #[error("invalid API timeout {raw:?}")]
    InvalidTimeout { raw: String },
}

/// Resolved server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind: SocketAddr,
    pub secure_cookies: bool,
    pub api_timeout: Duration,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let api_base_url = API_BASE_URL_VARS
            .iter()
            .find_map(|key| value(key))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let bind = parse_bind(&value("VOCAB_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()))?;
        let secure_cookies = value("VOCAB_SECURE_COOKIES").is_some_and(|raw| is_truthy(&raw));
        let api_timeout = match value("VOCAB_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidTimeout { raw })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            bind,
            secure_cookies,
            api_timeout,
        })
    }
}

/// # Errors
///
/// Returns [`ConfigError::InvalidBind`] for anything that is not `host:port`.
pub fn parse_bind(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidBind {
            raw: raw.to_string(),
        })
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert!(!config.secure_cookies);
        assert_eq!(config.api_timeout, Duration::from_secs(15));
    }

    #[test]
    fn api_url_falls_back_through_the_variables() {
        let config = config(&[
            ("VOCAB_API_BASE_URL", "  "),
            ("NEXT_PUBLIC_API_BASE_URL", "http://public:8080"),
            ("INTERNAL_API_BASE_URL", "http://internal:8080"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "http://internal:8080");
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            config(&[("VOCAB_BIND", "nowhere")]),
            Err(ConfigError::InvalidBind { .. })
        ));
        assert!(matches!(
            config(&[("VOCAB_API_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(config(&[("VOCAB_SECURE_COOKIES", "TRUE")]).unwrap().secure_cookies);
    }
}
