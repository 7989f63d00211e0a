//! Subscription Fetcher Port
//!
//! Defines the interface for downloading remote subscription bodies.

use async_trait::async_trait;

/// Errors raised while downloading a subscription.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("subscription returned status {0}")]
    Status(u16),
    #[error("subscription request failed: {0}")]
    Transport(String),
}

/// Source of raw subscription text.
#[async_trait]
pub trait SubscriptionFetcher: Send + Sync {
    /// Fetch the raw body behind a subscription URL.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
