//! OneBot REST API client.
//!
//! DESIGN
//! ======
//! Every request goes through one pipeline in [`ApiClient::request`]:
//!
//! 1. Resolve the URL against the configured base (absolute URLs pass through).
//! 2. For API URLs, attach `Authorization: Bearer <token>` from the
//!    [`TokenSource`] unless the endpoint is public or the caller already set
//!    the header.
//! 3. Count the request in the [`LoadingTracker`] unless it opted out with
//!    `X-Skip-Loader`.
//! 4. Map failures to [`ApiError`] and, for API URLs, raise a toast through the
//!    [`Notifier`]. 401/403 never toast; the caller re-authenticates.

pub mod error;
pub mod loading;
pub mod options;

pub use error::ApiError;
pub use loading::{LoadingGuard, LoadingTracker};
pub use options::{ApiOptions, SKIP_LOADER_HEADER, build_url};

use crate::config::AppConfig;
use crate::notify::Notifier;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Endpoints that must never carry a bearer token.
pub const PUBLIC_ENDPOINTS: [&str; 2] = ["/auth/login", "/auth/refresh"];

const TOKEN_PREVIEW_CHARS: usize = 12;

// =============================================================================
// TOKEN SOURCE
// =============================================================================

/// Supplies the bearer token for outgoing API requests.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    /// Current ID token, or `None` when nobody is signed in.
    async fn bearer_token(&self) -> Result<Option<String>, ApiError>;
}

/// A fixed token, e.g. one passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.0.clone())
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    production: bool,
    tokens: Arc<dyn TokenSource>,
    notifier: Arc<dyn Notifier>,
    loading: LoadingTracker,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &AppConfig, tokens: Arc<dyn TokenSource>, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            production: config.production,
            tokens,
            notifier,
            loading: LoadingTracker::new(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: &ApiOptions) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, options).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T, B>(&self, path: &str, body: &B, options: &ApiOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::POST, path, Some(body), options).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<T, B>(&self, path: &str, body: &B, options: &ApiOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::PUT, path, Some(body), options).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<T, B>(&self, path: &str, body: &B, options: &ApiOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::PATCH, path, Some(body), options).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: &ApiOptions) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None::<&()>, options).await
    }

    /// Send one request through the auth, loading and error pipeline.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Token`] if the token source fails
    /// - [`ApiError::Network`] if no response arrives
    /// - [`ApiError::Unauthorized`], [`ApiError::Rejected`], [`ApiError::Server`]
    ///   for non-success statuses
    /// - [`ApiError::Parse`] if the body does not match `T`
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>, options: &ApiOptions) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = if options::is_absolute(path) { path.to_owned() } else { build_url(&self.base_url, path) };
        let is_api = url.starts_with(&self.base_url);

        let mut headers = build_headers(options)?;
        if is_api && !is_public_endpoint(&url) && !headers.contains_key(AUTHORIZATION) {
            if let Some(token) = self.tokens.bearer_token().await? {
                if !self.production {
                    tracing::debug!(%method, %url, token = %token_preview(&token), "attaching bearer token");
                }
                let value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        let _loading = (is_api && !options.skips_loader()).then(|| self.loading.begin());

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if !options.query_pairs().is_empty() {
            builder = builder.query(options.query_pairs());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let result = match builder.send().await {
            Ok(response) => read_response(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        };

        result.map_err(|err| {
            if is_api {
                self.report(&method, &url, &err);
            }
            err
        })
    }

    fn report(&self, method: &Method, url: &str, err: &ApiError) {
        match err {
            ApiError::Unauthorized { status } => {
                tracing::warn!(%method, %url, status, "request not authorized");
            }
            _ => tracing::error!(%method, %url, error = %err, "api request failed"),
        }
        if let Some(message) = err.user_message() {
            self.notifier.toast_error(&message);
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(error::classify_status(status.as_u16(), &text));
    }

    let json = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(json).map_err(|e| ApiError::Parse(e.to_string()))
}

fn build_headers(options: &ApiOptions) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    for (name, value) in options.headers() {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
        headers.insert(name, value);
    }
    if options.skips_loader() {
        headers.insert(HeaderName::from_static("x-skip-loader"), HeaderValue::from_static("true"));
    }
    Ok(headers)
}

fn is_public_endpoint(url: &str) -> bool {
    PUBLIC_ENDPOINTS.iter().any(|endpoint| url.contains(endpoint))
}

fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
