//! HTTP client utilities for shelf.
//!
//! A small builder API over a pluggable [`Transport`], with JSON helpers.
//! The default transport is `reqwest`; tests swap in their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_data::FetchClient;
//! use std::time::Duration;
//!
//! let client = FetchClient::with_timeout(Duration::from_secs(30))?
//!     .with_base_url("http://localhost:8000/api");
//!
//! let books: serde_json::Value = client
//!     .get("/books")
//!     .query("page", "1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use request::{Method, Request, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a `reqwest`-backed client with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(timeout)?)))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Add several query parameters.
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query_pairs(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Add a bearer header when a token is present.
    pub fn maybe_bearer_auth(self, token: Option<impl AsRef<str>>) -> Self {
        match token {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build();
        let method = request.method;
        let url = request.url.clone();
        let started = Instant::now();

        let result = self.transport.send(request).await;
        match &result {
            Ok(response) => debug!(
                method = method.as_str(),
                %url,
                status = response.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "http request"
            ),
            Err(error) => debug!(method = method.as_str(), %url, %error, "http request failed"),
        }
        result
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Request, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Request>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: Request) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::json_body(200, &serde_json::json!({"ok": true})))
        }
    }

    #[tokio::test]
    async fn test_base_url_joined_once() {
        let recorder = Arc::new(Recorder::default());
        let client =
            FetchClient::new(recorder.clone()).with_base_url("http://localhost:8000/api/");

        client.get("/books").send().await.unwrap();
        client.get("genres").send().await.unwrap();
        client.get("https://other.host/x").send().await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].url, "http://localhost:8000/api/books");
        assert_eq!(seen[1].url, "http://localhost:8000/api/genres");
        assert_eq!(seen[2].url, "https://other.host/x");
    }

    #[tokio::test]
    async fn test_default_headers_and_auth() {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::new(recorder.clone())
            .with_default_header("Accept", "application/json");

        let response = client
            .post("http://api/transactions")
            .maybe_bearer_auth(Some("tok"))
            .json(&serde_json::json!({"items": []}))
            .unwrap()
            .send()
            .await
            .unwrap();
        assert!(response.is_success());

        client
            .get("http://api/books")
            .maybe_bearer_auth(None::<String>)
            .send()
            .await
            .unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].header("accept"), Some("application/json"));
        assert_eq!(seen[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(seen[0].method, Method::Post);
        assert_eq!(seen[1].header("authorization"), None);
    }
}
