use std::time::Duration;

use homelab_types::Validate;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// HTTP client bound to one base URL.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` below the base URL.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// GET `path`, decode the JSON body as `T` and validate it.
    pub async fn get_json<T>(&self, path: &str, query: &[(String, String)]) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Validate,
    {
        let url = self.url(path);

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let value: T = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        value.validate()?;
        Ok(value)
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Set the base URL (e.g., "http://192.168.1.10:8000").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient, FetchError> {
        let base_url = self
            .base_url
            .ok_or_else(|| FetchError::Config("base URL is required".to_string()))?;
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("homelab-dash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
