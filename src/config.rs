//! Application configuration parsed from environment variables.
//!
//! Values are read once at startup and passed into constructors as plain
//! structs. The binary loads a `.env` file first (via `dotenvy`), so the
//! same variables work in development and in deployment.

use std::time::Duration;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOKEN_REFRESH_THRESHOLD_SECS: u64 = 5 * 60;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set or is blank.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but its value cannot be used.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Firebase web app settings. Only `api_key` is needed for the REST
/// sign-in flow; the rest is kept for parity with the web console values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl HttpTimeouts {
    #[must_use]
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_HTTP_TIMEOUT_SECS, connect_secs: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the OneBot REST API, without trailing slash.
    pub api_base_url: String,
    pub production: bool,
    /// `None` when no Firebase web API key is configured.
    pub firebase: Option<FirebaseConfig>,
    pub timeouts: HttpTimeouts,
    /// Refresh the ID token when it expires within this window.
    pub token_refresh_threshold: Duration,
}

impl AppConfig {
    /// Config for `api_base_url` with every other value at its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the URL is not absolute http(s).
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            production: false,
            firebase: None,
            timeouts: HttpTimeouts::default(),
            token_refresh_threshold: Duration::from_secs(DEFAULT_TOKEN_REFRESH_THRESHOLD_SECS),
        })
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `API_BASE_URL`
    ///
    /// Optional:
    /// - `ONEBOT_PRODUCTION`: `1/true/yes/on` or `0/false/no/off` (default false)
    /// - `FIREBASE_API_KEY` plus `FIREBASE_AUTH_DOMAIN`, `FIREBASE_PROJECT_ID`,
    ///   `FIREBASE_STORAGE_BUCKET`, `FIREBASE_MESSAGING_SENDER_ID`, `FIREBASE_APP_ID`
    /// - `ONEBOT_HTTP_TIMEOUT_SECS`: default 30
    /// - `ONEBOT_HTTP_CONNECT_TIMEOUT_SECS`: default 10
    /// - `ONEBOT_TOKEN_REFRESH_THRESHOLD_SECS`: default 300
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `API_BASE_URL` is missing or malformed,
    /// or `ONEBOT_PRODUCTION` is not a recognizable boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_base = env_nonempty("API_BASE_URL").ok_or(ConfigError::Missing("API_BASE_URL"))?;
        let mut config = Self::new(&raw_base)?;

        config.production = match env_nonempty("ONEBOT_PRODUCTION") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "ONEBOT_PRODUCTION",
                reason: format!("expected a boolean, got '{raw}'"),
            })?,
        };

        config.firebase = env_nonempty("FIREBASE_API_KEY").map(|api_key| FirebaseConfig {
            api_key,
            auth_domain: env_or_empty("FIREBASE_AUTH_DOMAIN"),
            project_id: env_or_empty("FIREBASE_PROJECT_ID"),
            storage_bucket: env_or_empty("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: env_or_empty("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: env_or_empty("FIREBASE_APP_ID"),
        });

        config.timeouts = HttpTimeouts {
            request_secs: env_parse_u64("ONEBOT_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
            connect_secs: env_parse_u64("ONEBOT_HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        };
        config.token_refresh_threshold = Duration::from_secs(env_parse_u64(
            "ONEBOT_TOKEN_REFRESH_THRESHOLD_SECS",
            DEFAULT_TOKEN_REFRESH_THRESHOLD_SECS,
        ));

        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var: "API_BASE_URL",
            reason: format!("expected an absolute http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn env_or_empty(key: &str) -> String {
    env_nonempty(key).unwrap_or_default()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
