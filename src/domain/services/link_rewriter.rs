//! Link Rewriter - Domain Service
//!
//! Per-protocol host extraction and name injection for share-links.
//! Two link shapes exist:
//! - vmess: `vmess://<base64 JSON record>`, the name lives in `ps`
//! - delimited: `scheme://<credentials>@<host>:<port>[?query]#<name>`

use crate::domain::codec::{self, CodecError};
use serde_json::{Map, Value};

/// Protocols using the `credentials@host:port#name` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Vless,
    Shadowsocks,
    Trojan,
    Tuic,
    Hysteria2,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vless => "vless",
            Self::Shadowsocks => "ss",
            Self::Trojan => "trojan",
            Self::Tuic => "tuic",
            Self::Hysteria2 => "hysteria2",
        }
    }
}

/// Link shape selected by scheme prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Vmess,
    Delimited(Protocol),
    Unsupported,
}

impl LinkKind {
    /// Dispatch on the fixed, case-sensitive scheme prefix.
    pub fn detect(link: &str) -> Self {
        const PREFIXES: [(&str, Protocol); 6] = [
            ("vless://", Protocol::Vless),
            ("ss://", Protocol::Shadowsocks),
            ("trojan://", Protocol::Trojan),
            ("tuic://", Protocol::Tuic),
            ("hysteria2://", Protocol::Hysteria2),
            ("hy2://", Protocol::Hysteria2),
        ];

        if link.starts_with("vmess://") {
            return Self::Vmess;
        }
        PREFIXES
            .iter()
            .find(|(prefix, _)| link.starts_with(prefix))
            .map(|(_, proto)| Self::Delimited(*proto))
            .unwrap_or(Self::Unsupported)
    }
}

/// Why a link was left as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error("unsupported link scheme")]
    Unsupported,
    #[error("missing '://' separator")]
    MissingSchemeSeparator,
    #[error("missing '@' delimiter")]
    MissingDelimiter,
    #[error("missing host")]
    MissingHost,
    #[error("payload decode failed: {0}")]
    Payload(#[from] CodecError),
    #[error("invalid vmess record: {0}")]
    InvalidRecord(String),
}

/// Outcome of rewriting one link. Failures keep the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Rewritten(String),
    Unchanged { link: String, reason: RewriteError },
}

impl Rewrite {
    pub fn unchanged(link: &str, reason: RewriteError) -> Self {
        Self::Unchanged {
            link: link.to_string(),
            reason,
        }
    }

    pub fn is_rewritten(&self) -> bool {
        matches!(self, Self::Rewritten(_))
    }

    pub fn as_link(&self) -> &str {
        match self {
            Self::Rewritten(link) | Self::Unchanged { link, .. } => link,
        }
    }

    pub fn into_link(self) -> String {
        match self {
            Self::Rewritten(link) | Self::Unchanged { link, .. } => link,
        }
    }
}

/// A decoded vmess link.
#[derive(Debug, Clone)]
pub struct VmessLink {
    scheme: String,
    record: Map<String, Value>,
    host: String,
}

impl VmessLink {
    pub fn parse(link: &str) -> Result<Self, RewriteError> {
        let (scheme, payload) = link
            .split_once("://")
            .ok_or(RewriteError::MissingSchemeSeparator)?;
        let json = codec::decode(payload)?;
        let record: Map<String, Value> = serde_json::from_str(&json)
            .map_err(|e| RewriteError::InvalidRecord(e.to_string()))?;

        let host = record
            .get("add")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RewriteError::MissingHost)?
            .to_string();

        Ok(Self {
            scheme: scheme.to_string(),
            record,
            host,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Overwrite `ps` and re-encode. Every other field is kept as decoded.
    pub fn with_name(mut self, name: &str) -> Result<String, RewriteError> {
        self.record
            .insert("ps".to_string(), Value::String(name.to_string()));
        let json = serde_json::to_string(&self.record)
            .map_err(|e| RewriteError::InvalidRecord(e.to_string()))?;
        Ok(format!("{}://{}", self.scheme, codec::encode(&json)))
    }
}

/// A `prefix@addport#name` link, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedLink<'a> {
    prefix: &'a str,
    addport: &'a str,
    host: &'a str,
}

impl<'a> DelimitedLink<'a> {
    pub fn parse(link: &'a str) -> Result<Self, RewriteError> {
        let (prefix, rest) = link.split_once('@').ok_or(RewriteError::MissingDelimiter)?;
        let addport = rest.split('#').next().unwrap_or_default();
        let host = host_of(addport);
        if host.is_empty() {
            return Err(RewriteError::MissingHost);
        }
        Ok(Self {
            prefix,
            addport,
            host,
        })
    }

    pub fn host(&self) -> &'a str {
        self.host
    }

    /// Host, port and query exactly as they appeared in the input.
    pub fn addport(&self) -> &'a str {
        self.addport
    }

    pub fn with_name(&self, name: &str) -> String {
        format!("{}@{}#{}", self.prefix, self.addport, name)
    }
}

/// Host part of `host:port[?query]`. Bracketed IPv6 literals stay whole.
fn host_of(addport: &str) -> &str {
    if addport.starts_with('[') {
        if let Some(end) = addport.find(']') {
            return &addport[..=end];
        }
    }
    let end = addport
        .find(|c| matches!(c, ':' | '?' | '/'))
        .unwrap_or(addport.len());
    &addport[..end]
}

/// A link whose host has been located and that can take a new name.
#[derive(Debug, Clone)]
pub enum ParsedLink<'a> {
    Vmess(VmessLink),
    Delimited(DelimitedLink<'a>),
}

impl<'a> ParsedLink<'a> {
    /// Parse any supported link.
    pub fn parse(link: &'a str) -> Result<Self, RewriteError> {
        match LinkKind::detect(link) {
            LinkKind::Vmess => VmessLink::parse(link).map(Self::Vmess),
            LinkKind::Delimited(_) => DelimitedLink::parse(link).map(Self::Delimited),
            LinkKind::Unsupported => Err(RewriteError::Unsupported),
        }
    }

    pub fn host(&self) -> &str {
        match self {
            Self::Vmess(v) => v.host(),
            Self::Delimited(d) => d.host(),
        }
    }

    pub fn with_name(self, name: &str) -> Result<String, RewriteError> {
        match self {
            Self::Vmess(v) => v.with_name(name),
            Self::Delimited(d) => Ok(d.with_name(name)),
        }
    }
}
