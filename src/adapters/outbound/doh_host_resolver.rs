//! DNS-over-HTTPS Host Resolver
//!
//! Implements HostResolver by walking an ordered list of DoH providers.

use crate::adapters::outbound::providers::{query_json, DnsProvider, ProviderError};
use crate::adapters::outbound::resolution_cache::ResolutionCache;
use crate::domain::entities::DnsAnswer;
use crate::domain::ports::HostResolver;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Hostname resolver with sequential provider fallback.
///
/// Providers are queried strictly in order, each bounded by its own
/// timeout. The first provider that yields an address wins and the rest
/// are not contacted. The final answer, including the unresolved sentinel,
/// is memoized in the shared [`ResolutionCache`].
pub struct DohHostResolver {
    client: reqwest::Client,
    providers: Vec<DnsProvider>,
    cache: Arc<ResolutionCache>,
    timeout: Duration,
}

impl DohHostResolver {
    pub fn new(
        client: reqwest::Client,
        providers: Vec<DnsProvider>,
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

    /// Resolver over [`DnsProvider::defaults`].
    pub fn with_defaults(
        client: reqwest::Client,
        cache: Arc<ResolutionCache>,
        timeout: Duration,
    ) -> Self {
        Self::new(client, DnsProvider::defaults(), cache, timeout)
    }

    async fn query(&self, provider: &DnsProvider, hostname: &str) -> Option<String> {
        let url = provider.endpoint(hostname);
        match query_json(&self.client, &url, &provider.headers, self.timeout).await {
            Ok(body) => provider.parse(&body),
            Err(ProviderError::Timeout(after)) => {
                tracing::debug!(
                    "dns provider {} timed out after {:?} for {}",
                    provider.name,
                    after,
                    hostname
                );
                None
            }
            Err(ProviderError::Status(status)) => {
                tracing::debug!(
                    "dns provider {} returned {} for {}",
                    provider.name,
                    status,
                    hostname
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    service = %provider.name,
                    domain = %hostname,
                    "dns lookup failed: {}",
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl HostResolver for DohHostResolver {
    async fn resolve_host(&self, hostname: &str) -> DnsAnswer {
        if let Some(cached) = self.cache.host(hostname) {
            tracing::debug!("dns cache hit for {} -> {}", hostname, cached.ip);
            return cached;
        }

        let mut answer = DnsAnswer::unresolved();
        for provider in &self.providers {
            if let Some(ip) = self.query(provider, hostname).await {
                answer = DnsAnswer::new(ip, provider.name.clone());
                break;
            }
        }

        if !answer.is_resolved() {
            tracing::warn!("no dns provider resolved {}", hostname);
        }
        self.cache.insert_host(hostname, answer.clone());
        answer
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::adapters::outbound::providers::DnsAnswerFormat;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, name: &str, format: DnsAnswerFormat) -> DnsProvider {
        DnsProvider::new(
            name,
            &format!("{}/{}?name={{host}}", server.uri(), name),
            format,
        )
    }

    fn answer(data: &str) -> serde_json::Value {
        json!({"Status": 0, "Answer": [{"name": "x.", "type": 1, "TTL": 60, "data": data}]})
    }

    fn resolver(providers: Vec<DnsProvider>, timeout: Duration) -> DohHostResolver {
        DohHostResolver::new(
            reqwest::Client::new(),
            providers,
            Arc::new(ResolutionCache::new()),
            timeout,
        )
    }

    #[tokio::test]
    async fn test_first_provider_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/first"))
            .and(query_param("name", "node.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.0.0.1")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/second"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.0.0.2")))
            .expect(0)
            .mount(&server)
            .await;

        let resolver = resolver(
            vec![
                provider(&server, "first", DnsAnswerFormat::AnyAddress),
                provider(&server, "second", DnsAnswerFormat::Ipv4Only),
            ],
            Duration::from_secs(1),
        );

        let result = resolver.resolve_host("node.example.com").await;
        assert_eq!(result, DnsAnswer::new("10.0.0.1", "first"));
    }

    #[tokio::test]
    async fn test_falls_back_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(path("/first"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/second"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.0.0.2")))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = resolver(
            vec![
                provider(&server, "first", DnsAnswerFormat::AnyAddress),
                provider(&server, "second", DnsAnswerFormat::Ipv4Only),
            ],
            Duration::from_secs(1),
        );

        let result = resolver.resolve_host("example.org").await;
        assert_eq!(result, DnsAnswer::new("10.0.0.2", "second"));
    }

    #[tokio::test]
    async fn test_falls_back_on_empty_answer_and_bad_json() {
        let server = MockServer::start().await;
        Mock::given(path("/first"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": 3})))
            .mount(&server)
            .await;
        Mock::given(path("/second"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        Mock::given(path("/third"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.0.0.3")))
            .mount(&server)
            .await;

        let resolver = resolver(
            vec![
                provider(&server, "first", DnsAnswerFormat::AnyAddress),
                provider(&server, "second", DnsAnswerFormat::AnyAddress),
                provider(&server, "third", DnsAnswerFormat::AnyAddress),
            ],
            Duration::from_secs(1),
        );

        let result = resolver.resolve_host("example.net").await;
        assert_eq!(result.source, "third");
    }

    #[tokio::test]
    async fn test_timeout_skips_provider() {
        let server = MockServer::start().await;
        Mock::given(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(answer("10.0.0.1"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        Mock::given(path("/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.0.0.9")))
            .mount(&server)
            .await;

        let resolver = resolver(
            vec![
                provider(&server, "slow", DnsAnswerFormat::AnyAddress),
                provider(&server, "fast", DnsAnswerFormat::AnyAddress),
            ],
            Duration::from_millis(100),
        );

        let result = resolver.resolve_host("example.com").await;
        assert_eq!(result, DnsAnswer::new("10.0.0.9", "fast"));
    }

    #[tokio::test]
    async fn test_all_fail_returns_sentinel_and_caches_it() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let resolver = resolver(
            vec![
                provider(&server, "first", DnsAnswerFormat::AnyAddress),
                provider(&server, "second", DnsAnswerFormat::Ipv4Only),
            ],
            Duration::from_secs(1),
        );

        let first = resolver.resolve_host("nx.invalid").await;
        let second = resolver.resolve_host("nx.invalid").await;

        assert_eq!(first, DnsAnswer::unresolved());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unreachable_provider_returns_sentinel() {
        let resolver = resolver(
            vec![DnsProvider::new(
                "down",
                "http://127.0.0.1:1/resolve?name={host}",
                DnsAnswerFormat::AnyAddress,
            )],
            Duration::from_secs(1),
        );

        assert_eq!(
            resolver.resolve_host("example.com").await,
            DnsAnswer::unresolved()
        );
    }

    #[tokio::test]
    async fn test_cache_hit_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(path("/first"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.1.1.1")))
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(ResolutionCache::new());
        let resolver = DohHostResolver::new(
            reqwest::Client::new(),
            vec![provider(&server, "first", DnsAnswerFormat::AnyAddress)],
            cache.clone(),
            Duration::from_secs(1),
        );

        let a = resolver.resolve_host("cached.example").await;
        let b = resolver.resolve_host("cached.example").await;
        assert_eq!(a, b);
        assert_eq!(cache.host_entries(), 1);
    }

    #[tokio::test]
    async fn test_provider_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(path("/cf"))
            .and(header("accept", "application/dns-json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer("10.2.2.2")))
            .expect(1)
            .mount(&server)
            .await;

        let cf = provider(&server, "cf", DnsAnswerFormat::Ipv4Only)
            .with_header("Accept", "application/dns-json");
        let resolver = resolver(vec![cf], Duration::from_secs(1));

        assert_eq!(resolver.resolve_host("a.example").await.ip, "10.2.2.2");
    }
}
