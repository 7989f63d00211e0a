mod geo_resolver;
mod host_resolver;
mod subscription_fetcher;

pub use geo_resolver::GeoResolver;
pub use host_resolver::HostResolver;
pub use subscription_fetcher::{FetchError, SubscriptionFetcher};
