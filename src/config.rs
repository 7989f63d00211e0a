use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HTTP settings
    pub listen_addr: String,
    pub bg_img: Option<String>,

    // Naming
    pub suffix: String,

    // Upstream timeouts
    pub provider_timeout_ms: u64,
    pub fetch_timeout_secs: u64,

    pub debug: bool,
}

impl Config {
    /// Per-request cap for a single DNS / geo provider query.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Total cap for downloading one subscription.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            bg_img: None,
            suffix: "MyNode".to_string(),
            provider_timeout_ms: 1000,
            fetch_timeout_secs: 10,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let listen_addr = std::env::var("NODE_RENAMER_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let bg_img = std::env::var("BG_IMG")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let suffix = std::env::var("LINK_RENAME").unwrap_or_else(|_| "MyNode".to_string());

    let provider_timeout_ms = std::env::var("NODE_RENAMER_PROVIDER_TIMEOUT_MS")
        .unwrap_or_else(|_| "1000".to_string())
        .parse()
        .unwrap_or(1000);

    let fetch_timeout_secs = std::env::var("NODE_RENAMER_FETCH_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        listen_addr,
        bg_img,
        suffix,
        provider_timeout_ms,
        fetch_timeout_secs,
        debug,
    })
}
