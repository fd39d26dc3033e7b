//! Typed fetchers for the upstream HTTP APIs.
//!
//! A [`Fetch`] implementation issues one request and returns a validated
//! value. Scheduling, retries and caching live in [`crate::query`].

pub mod catalog;
mod client;

pub use catalog::Catalog;
pub use client::{ApiClient, ApiClientBuilder};

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use homelab_types::Validate;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// One request against one upstream API.
///
/// # Example
///
/// ```
/// use homelab_dash::source::{ApiClient, Endpoint, Fetch};
/// use homelab_types::PiholeSummary;
///
/// let client = ApiClient::builder().base_url("http://192.168.1.10:8000").build().unwrap();
/// let endpoint: Endpoint<PiholeSummary> = Endpoint::new(client, "/pihole/summary/");
/// assert_eq!(endpoint.describe(), "GET http://192.168.1.10:8000/pihole/summary/");
/// ```
#[async_trait]
pub trait Fetch: Send + Sync {
    type Output: Send + Sync + 'static;

    /// Issue the request and return the validated response.
    async fn fetch(&self) -> Result<Self::Output, FetchError>;

    /// Human-readable description, shown in the detail overlay.
    fn describe(&self) -> String;
}

/// GET of a fixed path that decodes into `T`.
pub struct Endpoint<T> {
    client: ApiClient,
    path: String,
    query: Vec<(String, String)>,
    _response: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            query: Vec::new(),
            _response: PhantomData,
        }
    }

    /// Append a query-string parameter; the value is URL-encoded on send.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn url(&self) -> String {
        self.client.url(&self.path)
    }
}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url())
            .field("query", &self.query)
            .finish()
    }
}

#[async_trait]
impl<T> Fetch for Endpoint<T>
where
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    type Output = T;

    async fn fetch(&self) -> Result<T, FetchError> {
        self.client.get_json(&self.path, &self.query).await
    }

    fn describe(&self) -> String {
        let mut out = format!("GET {}", self.url());
        for (i, (name, value)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}
