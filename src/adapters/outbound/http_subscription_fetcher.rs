//! HTTP Subscription Fetcher
//!
//! Implements SubscriptionFetcher with a shared reqwest client.

use crate::domain::ports::{FetchError, SubscriptionFetcher};
use async_trait::async_trait;
use std::time::Duration;

/// Downloads subscription bodies over HTTP(S).
pub struct HttpSubscriptionFetcher {
    client: reqwest::Client,
}

impl HttpSubscriptionFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a fetcher whose requests are capped at `timeout` end to end.
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("node-renamer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl SubscriptionFetcher for HttpSubscriptionFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sub"))
            .respond_with(ResponseTemplate::new(200).set_body_string("dmxlc3M6Ly8="))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpSubscriptionFetcher::with_timeout(Duration::from_secs(5)).unwrap();
        let body = fetcher.fetch(&format!("{}/sub", server.uri())).await.unwrap();
        assert_eq!(body, "dmxlc3M6Ly8=");
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpSubscriptionFetcher::new(reqwest::Client::new());
        let err = fetcher
            .fetch(&format!("{}/gone", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let fetcher = HttpSubscriptionFetcher::with_timeout(Duration::from_millis(100)).unwrap();
        let err = fetcher
            .fetch(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        let fetcher = HttpSubscriptionFetcher::new(reqwest::Client::new());
        let err = fetcher.fetch("http://127.0.0.1:1/sub").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
