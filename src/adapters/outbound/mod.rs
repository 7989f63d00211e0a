mod doh_host_resolver;
mod http_geo_resolver;
mod http_subscription_fetcher;
pub mod providers;
mod resolution_cache;

pub use doh_host_resolver::DohHostResolver;
pub use http_geo_resolver::HttpGeoResolver;
pub use http_subscription_fetcher::HttpSubscriptionFetcher;
pub use providers::{DnsAnswerFormat, DnsProvider, GeoFormat, GeoProvider, ProviderError};
pub use resolution_cache::ResolutionCache;
