//! Resolution Providers
//!
//! Ordered descriptors for the DNS-over-HTTPS and IP-info services the
//! resolvers fall back through. Each provider pairs an endpoint template
//! with a parse strategy chosen from a closed set.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use std::time::Duration;

/// Characters escaped when a host or IP is substituted into an endpoint.
/// `:` and `.` stay literal so IPv6 addresses remain readable.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// DNS record type for A answers.
const RECORD_A: u64 = 1;
/// DNS record type for AAAA answers.
const RECORD_AAAA: u64 = 28;

/// Why a single provider query produced nothing.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

fn fill_template(template: &str, placeholder: &str, value: &str) -> String {
    let encoded = utf8_percent_encode(value, COMPONENT).to_string();
    template.replace(placeholder, &encoded)
}

/// Issue one GET and decode its JSON body, bounded by `timeout`.
pub async fn query_json(
    client: &reqwest::Client,
    url: &str,
    headers: &[(String, String)],
    timeout: Duration,
) -> Result<Value, ProviderError> {
    let request = async {
        let mut builder = client.get(url);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    };

    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| ProviderError::Timeout(timeout))?
}

/// Which answer records a DNS provider's result is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsAnswerFormat {
    /// First A or AAAA record in `Answer`
    AnyAddress,
    /// First A record in `Answer`
    Ipv4Only,
}

/// One DNS-over-HTTPS endpoint returning the JSON answer format.
#[derive(Debug, Clone)]
pub struct DnsProvider {
    /// Provider name, reported as the answer's source
    pub name: String,
    /// URL with a `{host}` placeholder
    pub endpoint_template: String,
    pub headers: Vec<(String, String)>,
    pub format: DnsAnswerFormat,
}

impl DnsProvider {
    pub fn new(name: &str, endpoint_template: &str, format: DnsAnswerFormat) -> Self {
        Self {
            name: name.to_string(),
            endpoint_template: endpoint_template.to_string(),
            headers: Vec::new(),
            format,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// AliDNS public resolver, queried by IP.
    pub fn aliyun() -> Self {
        Self::new(
            "aliyun",
            "https://223.5.5.5/resolve?name={host}",
            DnsAnswerFormat::AnyAddress,
        )
    }

    pub fn cloudflare() -> Self {
        Self::new(
            "cloudflare",
            "https://cloudflare-dns.com/dns-query?name={host}&type=A",
            DnsAnswerFormat::Ipv4Only,
        )
        .with_header("Accept", "application/dns-json")
    }

    /// Default providers in priority order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::aliyun(), Self::cloudflare()]
    }

    pub fn endpoint(&self, host: &str) -> String {
        fill_template(&self.endpoint_template, "{host}", host)
    }

    /// Extract the address from a JSON answer, if any.
    pub fn parse(&self, body: &Value) -> Option<String> {
        let accepts = |t: u64| match self.format {
            DnsAnswerFormat::AnyAddress => t == RECORD_A || t == RECORD_AAAA,
            DnsAnswerFormat::Ipv4Only => t == RECORD_A,
        };

        body.get("Answer")?
            .as_array()?
            .iter()
            .find(|record| record.get("type").and_then(Value::as_u64).is_some_and(accepts))?
            .get("data")?
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Fields a geolocation provider managed to supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoFields {
    pub country: Option<String>,
    pub org: Option<String>,
}

/// Response layout of a geolocation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoFormat {
    /// `{"country_code": "US", "organization": "Google LLC"}`
    Eooce,
    /// `{"country": "US", "org": "AS15169 Google LLC"}`
    IpInfo,
}

/// One IP-info endpoint.
#[derive(Debug, Clone)]
pub struct GeoProvider {
    pub name: String,
    /// URL with an `{ip}` placeholder
    pub endpoint_template: String,
    pub format: GeoFormat,
}

impl GeoProvider {
    pub fn new(name: &str, endpoint_template: &str, format: GeoFormat) -> Self {
        Self {
            name: name.to_string(),
            endpoint_template: endpoint_template.to_string(),
            format,
        }
    }

    pub fn eooce() -> Self {
        Self::new("eooce", "https://ip.eooce.com/{ip}", GeoFormat::Eooce)
    }

    pub fn ipinfo() -> Self {
        Self::new("ipinfo", "https://ipinfo.io/{ip}/json", GeoFormat::IpInfo)
    }

    /// Default providers in priority order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::eooce(), Self::ipinfo()]
    }

    pub fn endpoint(&self, ip: &str) -> String {
        fill_template(&self.endpoint_template, "{ip}", ip)
    }

    pub fn parse(&self, body: &Value) -> GeoFields {
        match self.format {
            GeoFormat::Eooce => GeoFields {
                country: non_empty_str(body, "country_code"),
                org: non_empty_str(body, "organization").and_then(|o| {
                    first_token(&o, |c| c.is_whitespace() || c == ',' || c == '-')
                }),
            },
            GeoFormat::IpInfo => GeoFields {
                country: non_empty_str(body, "country"),
                org: non_empty_str(body, "org")
                    .and_then(|o| first_token(strip_asn_prefix(&o), char::is_whitespace)),
            },
        }
    }
}

fn non_empty_str(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Leading token before the first separator; `None` when it is empty.
fn first_token(s: &str, is_sep: impl Fn(char) -> bool) -> Option<String> {
    s.split(is_sep)
        .next()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Drop a leading `AS<digits><whitespace>` as ipinfo prefixes the ASN.
fn strip_asn_prefix(org: &str) -> &str {
    let Some(rest) = org.strip_prefix("AS") else {
        return org;
    };
    let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == rest.len() {
        return org;
    }
    let after_space = after_digits.trim_start();
    if after_space.len() == after_digits.len() {
        return org;
    }
    after_space
}
