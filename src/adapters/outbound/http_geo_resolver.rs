//! HTTP Geo Resolver
//!
//! Implements GeoResolver by merging answers from ordered IP-info providers.

use crate::adapters::outbound::providers::{query_json, GeoFields, GeoProvider, ProviderError};
use crate::adapters::outbound::resolution_cache::ResolutionCache;
use crate::domain::entities::GeoInfo;
use crate::domain::ports::GeoResolver;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// IP geolocation with per-field provider fallback.
///
/// Unlike DNS resolution a provider that knows only one of country / org
/// still counts: the walk continues until both fields are known or the list
/// is exhausted. Each field keeps the first value seen.
pub struct HttpGeoResolver {
    client: reqwest::Client,
    providers: Vec<GeoProvider>,
    cache: Arc<ResolutionCache>,
    timeout: Duration,
}

impl HttpGeoResolver {
    pub fn new(
        client: reqwest::Client,
        providers: Vec<GeoProvider>,
        cache: Arc<ResolutionCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            providers,
            cache,
            timeout,
        }
    }

    /// Resolver over [`GeoProvider::defaults`].
    pub fn with_defaults(
        client: reqwest::Client,
        cache: Arc<ResolutionCache>,
        timeout: Duration,
    ) -> Self {
        Self::new(client, GeoProvider::defaults(), cache, timeout)
    }

    async fn query(&self, provider: &GeoProvider, ip: &str) -> GeoFields {
        let url = provider.endpoint(ip);
        match query_json(&self.client, &url, &[], self.timeout).await {
            Ok(body) => provider.parse(&body),
            Err(ProviderError::Timeout(after)) => {
                tracing::debug!("geo provider {} timed out after {:?} for {}", provider.name, after, ip);
                GeoFields::default()
            }
            Err(ProviderError::Status(status)) => {
                tracing::debug!("geo provider {} returned {} for {}", provider.name, status, ip);
                GeoFields::default()
            }
            Err(e) => {
                tracing::warn!(service = %provider.name, ip = %ip, "ip info request failed: {}", e);
                GeoFields::default()
            }
        }
    }
}

#[async_trait]
impl GeoResolver for HttpGeoResolver {
    async fn resolve_geo(&self, ip: &str) -> GeoInfo {
        if let Some(cached) = self.cache.geo(ip) {
            tracing::debug!("geo cache hit for {}", ip);
            return cached;
        }

        let mut country: Option<String> = None;
        let mut org: Option<String> = None;
        for provider in &self.providers {
            let fields = self.query(provider, ip).await;
            country = country.or(fields.country);
            org = org.or(fields.org);
            if country.is_some() && org.is_some() {
                break;
            }
        }

        let info = GeoInfo::from_parts(country, org);
        self.cache.insert_geo(ip, info.clone());
        info
    }
}
