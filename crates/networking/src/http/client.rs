//! Admin API HTTP client with bearer-token authentication

use super::envelope::{error_message, unwrap_body};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, RequestBuilder, Response, StatusCode,
};
use rewards_admin_core::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT_VALUE: &str = concat!("rewards-admin/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`AdminClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.example.com/api/v1`
    pub base_url: String,
    /// Bearer token attached to every request
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the rewards platform admin API
///
/// Every response body is unwrapped from its envelope here, so callers only
/// ever see the payload type they asked for.
pub struct AdminClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl AdminClient {
    /// Create a client from explicit configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidData(format!(
                "API base URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token: config.token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Default headers for every request
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidData("Token contains invalid characters".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Map a failed response onto our error type, surfacing the server's message
    async fn error_from_response(response: Response, context: &str) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

        error!("{} failed: HTTP {} - {}", context, status, message);

        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::FORBIDDEN => Error::Forbidden(message),
            StatusCode::NOT_FOUND => Error::NotFound(message),
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Send a request and return the raw body of a successful response
    async fn send_raw(&self, request: RequestBuilder, context: &str) -> Result<String> {
        let response = request
            .headers(self.default_headers()?)
            .send()
            .await
            .map_err(|e| {
                error!("{} request failed: {}", context, e);
                Error::Network(e.to_string())
            })?;

        debug!("{} response status: {}", context, response.status());

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, context).await);
        }

        response.text().await.map_err(|e| {
            error!("Failed to read {} response body: {}", context, e);
            Error::Network(e.to_string())
        })
    }

    /// Send a request and parse the enveloped payload
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, context: &str) -> Result<T> {
        let body = self.send_raw(request, context).await?;
        unwrap_body(&body).map_err(|e| {
            error!(
                "Failed to parse {} response: {}. Body preview: {}",
                context,
                e,
                preview(&body)
            );
            Error::InvalidData(e.to_string())
        })
    }

    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.send(self.http.get(&url), path).await
    }

    #[instrument(skip(self, query))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("GET {} (with query)", url);
        self.send(self.http.get(&url).query(query), path).await
    }

    #[instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        self.send(self.http.post(&url).json(body), path).await
    }

    #[instrument(skip(self, body))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("PUT {}", url);
        self.send(self.http.put(&url).json(body), path).await
    }

    #[instrument(skip(self, body))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("PATCH {}", url);
        self.send(self.http.patch(&url).json(body), path).await
    }

    /// Delete a resource. The response body, if any, is ignored.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        self.send_raw(self.http.delete(&url), path).await?;
        Ok(())
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(500) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
