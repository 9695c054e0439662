//! API client for the Anvil provisioning service
//!
//! Single-attempt authenticated HTTP exchanges. Every call builds the URL
//! from the configured base plus the fixed API-version segment, attaches a
//! bearer token obtained from the injected provider, and classifies the
//! outcome into [`ClientError`].

use std::sync::Arc;
use std::time::Duration;

use anvil_common::auth::AccessTokenProvider;
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::errors::ClientError;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anvil-cloud.io";

/// API version segment prepended to every endpoint path.
pub const API_VERSION_PATH: &str = "/api/provision/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API (without the version segment)
    pub base_url: String,
    /// Per-request timeout at the HTTP layer
    ///
    /// Much smaller than any wait-operation timeout; it keeps a single
    /// stuck request from blocking a poll loop.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl ApiClientConfig {
    /// Build a configuration, honoring an `ANVIL_API_URL` override
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ANVIL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url, timeout: DEFAULT_TIMEOUT }
    }
}

/// Authenticated transport for the provisioning API
///
/// Stateless per call and safe to share between concurrent callers; the
/// only shared mutable state lives inside the token provider.
pub struct ApiClient {
    http: HttpClient,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `config` - Client configuration
    /// * `auth` - Token provider; `None` sends unauthenticated requests
    ///   (test doubles only)
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        config: ApiClientConfig,
        auth: Option<Arc<dyn AccessTokenProvider>>,
    ) -> Result<Self, ClientError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, auth, config })
    }

    /// Create a builder for fluent configuration
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.config.base_url, API_VERSION_PATH, path)
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        match &self.auth {
            Some(auth) => {
                let token = auth.access_token().await?;
                Ok(request.bearer_auth(token))
            }
            None => Ok(request),
        }
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let request = self.authorize(request).await?;

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from)?;

        debug!(status = status.as_u16(), "received API response");

        if status.as_u16() >= 400 {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }

    /// Execute one authenticated exchange and return the raw response body
    ///
    /// Serializes `body` (if present) as JSON; always requests JSON back.
    /// The body is returned undecoded so callers can deserialize into their
    /// own typed structures.
    ///
    /// # Errors
    /// [`ClientError::Transport`] for network-level failures,
    /// [`ClientError::Api`] for status ≥ 400, [`ClientError::Auth`] if no
    /// token could be produced.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.url(path);
        debug!(%method, %url, "API request");

        let mut request = self.http.request(method, &url).header("Accept", "application/json");
        if let Some(body) = body {
            request = request.header("Content-Type", "application/json").json(body);
        }

        self.dispatch(request).await
    }

    /// GET an endpoint and decode the JSON response
    ///
    /// # Errors
    /// In addition to [`execute`](Self::execute) failures, returns
    /// [`ClientError::Decode`] if the body cannot be deserialized.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let bytes = self.execute(Method::GET, path, None).await?;
        decode(&bytes)
    }

    /// POST a JSON body and decode the JSON response
    ///
    /// # Errors
    /// See [`get`](Self::get).
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let body = to_value(body)?;
        let bytes = self.execute(Method::POST, path, Some(&body)).await?;
        decode(&bytes)
    }

    /// PUT a JSON body and decode the JSON response
    ///
    /// # Errors
    /// See [`get`](Self::get).
    pub async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let body = to_value(body)?;
        let bytes = self.execute(Method::PUT, path, Some(&body)).await?;
        decode(&bytes)
    }

    /// PATCH a JSON body and decode the JSON response
    ///
    /// # Errors
    /// See [`get`](Self::get).
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let body = to_value(body)?;
        let bytes = self.execute(Method::PATCH, path, Some(&body)).await?;
        decode(&bytes)
    }

    /// DELETE an endpoint, discarding the response body
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Download a binary-content endpoint (files, logs, manifests)
    ///
    /// Reads the raw response body without requesting or decoding JSON.
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    #[instrument(skip(self), fields(path = %path))]
    pub async fn download_raw(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.url(path);
        debug!(%url, "raw download");

        let request = self.http.get(&url);
        self.dispatch(request).await
    }

    /// DELETE an endpoint carrying filter parameters in the query string
    ///
    /// # Errors
    /// See [`execute`](Self::execute).
    #[instrument(skip(self, params), fields(path = %path))]
    pub async fn delete_with_query(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<(), ClientError> {
        let url = self.url(path);
        debug!(%url, "DELETE with query");

        let request =
            self.http.delete(&url).query(params).header("Accept", "application/json");
        self.dispatch(request).await?;
        Ok(())
    }
}

fn to_value<B: Serialize>(body: &B) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::Config(format!("failed to serialize request body: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    // 204-style responses have no body; let `()` and Option targets decode
    // from null.
    if bytes.is_empty() {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| ClientError::Decode(format!("empty response body: {e}")));
    }

    serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Builder for the API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    #[must_use]
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the token provider
    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<ApiClient, ClientError> {
        ApiClient::new(self.config.unwrap_or_default(), self.auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_version_and_path() {
        let client = ApiClient::builder()
            .config(ApiClientConfig {
                base_url: "https://example.test".to_string(),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(
            client.url("/clusters/abc"),
            "https://example.test/api/provision/v1/clusters/abc"
        );
    }

    #[test]
    fn decode_handles_empty_body_for_unit() {
        let result: Result<(), ClientError> = decode(&[]);
        assert!(result.is_ok());
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let result: Result<serde_json::Value, ClientError> = decode(b"not-json");
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
