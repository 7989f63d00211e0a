//! Rename Service - Main application use case
//!
//! Orchestrates the rename pipeline: expanding subscription input into
//! links, locating every node, rewriting names and encoding the result.

use crate::domain::codec;
use crate::domain::entities::{DisplayOptions, GeoInfo};
use crate::domain::ports::{GeoResolver, HostResolver, SubscriptionFetcher};
use crate::domain::services::{format_name, ParsedLink, Rewrite, RewriteError};
use crate::domain::value_objects::NodeAddress;
use futures::future::join_all;
use std::sync::Arc;

/// Rename service - main application use case.
///
/// This service orchestrates the rename logic:
/// 1. Expands raw input lines, fetching and decoding subscription URLs
/// 2. Rewrites every link concurrently (host -> IP -> country / org -> name)
/// 3. Joins the surviving links and encodes them as a subscription body
///
/// Nothing in the pipeline fails outward. Links that cannot be rewritten are
/// passed through untouched, unsupported links and broken subscriptions
/// contribute nothing.
pub struct RenameService {
    host_resolver: Arc<dyn HostResolver>,
    geo_resolver: Arc<dyn GeoResolver>,
    fetcher: Arc<dyn SubscriptionFetcher>,
    suffix: String,
}

impl RenameService {
    /// Create a new rename service.
    pub fn new(
        host_resolver: Arc<dyn HostResolver>,
        geo_resolver: Arc<dyn GeoResolver>,
        fetcher: Arc<dyn SubscriptionFetcher>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            host_resolver,
            geo_resolver,
            fetcher,
            suffix: suffix.into(),
        }
    }

    /// Suffix appended to names when the suffix option is on.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Resolve a node address to its country and organization.
    ///
    /// Literal IPs go straight to geolocation, hostnames are resolved
    /// first. A hostname no DNS provider could resolve maps to the unknown
    /// geo result without querying geolocation.
    pub async fn locate(&self, address: &str) -> GeoInfo {
        let ip = match NodeAddress::classify(address) {
            NodeAddress::Ip(ip) => ip,
            NodeAddress::Hostname(host) => {
                let answer = self.host_resolver.resolve_host(&host).await;
                if !answer.is_resolved() {
                    return GeoInfo::unknown();
                }
                tracing::debug!("resolved {} -> {} via {}", host, answer.ip, answer.source);
                answer.ip
            }
        };
        self.geo_resolver.resolve_geo(&ip).await
    }

    /// Rewrite one link, reporting why it was left alone if it was.
    pub async fn rename(&self, link: &str, options: &DisplayOptions) -> Rewrite {
        let parsed = match ParsedLink::parse(link) {
            Ok(parsed) => parsed,
            Err(RewriteError::Unsupported) => {
                return Rewrite::unchanged(link, RewriteError::Unsupported);
            }
            Err(reason) => {
                tracing::warn!("leaving link unchanged ({}): {}", reason, link);
                return Rewrite::unchanged(link, reason);
            }
        };

        let geo = self.locate(parsed.host()).await;
        let name = format_name(&geo, options, &self.suffix);

        match parsed.with_name(&name) {
            Ok(rewritten) => Rewrite::Rewritten(rewritten),
            Err(reason) => {
                tracing::warn!("failed to rewrite link ({}): {}", reason, link);
                Rewrite::unchanged(link, reason)
            }
        }
    }

    /// Rewrite one link for output: unsupported links become empty.
    pub async fn rewrite_link(&self, link: &str, options: &DisplayOptions) -> String {
        match self.rename(link, options).await {
            Rewrite::Unchanged {
                reason: RewriteError::Unsupported,
                ..
            } => String::new(),
            other => other.into_link(),
        }
    }

    /// Expand raw input lines into a flat list of links.
    ///
    /// `http://` and `https://` lines are subscriptions and are replaced by
    /// their (decoded) contents; any other line is a single link. Input order
    /// is kept and duplicates are not removed.
    pub async fn expand_input(&self, raw_lines: &[String]) -> Vec<String> {
        let mut links = Vec::new();
        for line in raw_lines {
            let line = line.trim();
            if line.starts_with("http://") || line.starts_with("https://") {
                links.extend(self.expand_subscription(line).await);
            } else {
                links.push(line.to_string());
            }
        }
        links
    }

    async fn expand_subscription(&self, url: &str) -> Vec<String> {
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("failed to fetch subscription {}: {}", url, e);
                return Vec::new();
            }
        };

        let text = if codec::looks_encoded(&body) {
            match codec::decode(&body) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("failed to decode subscription {}: {}", url, e);
                    return Vec::new();
                }
            }
        } else {
            body
        };

        let links: Vec<String> = text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        tracing::debug!("subscription {} expanded to {} links", url, links.len());
        links
    }

    /// Run the whole pipeline and return the encoded subscription body.
    pub async fn process_subscription(&self, raw_lines: &[String], options: &DisplayOptions) -> String {
        let links = self.expand_input(raw_lines).await;

        // join_all keeps input order regardless of completion order
        let rewritten = join_all(links.iter().map(|link| self.rewrite_link(link, options))).await;

        let output: Vec<String> = rewritten.into_iter().filter(|l| !l.is_empty()).collect();
        tracing::info!(
            "renamed batch: {} input lines, {} links, {} in output",
            raw_lines.len(),
            links.len(),
            output.len()
        );

        codec::encode(&output.join("\n"))
    }
}
