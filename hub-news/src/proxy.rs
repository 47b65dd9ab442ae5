//! Relay fetcher for feed documents
//!
//! Most publisher feeds refuse cross-origin reads, so documents are pulled
//! through CORS relays. Relays are tried in order; the first usable body
//! wins and every failure (status, network, timeout, bad envelope) simply
//! falls through to the next relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NewsError;

/// Upper bound for a single relay attempt (request + body)
pub const RELAY_TIMEOUT_SECS: u64 = 8;

/// How a relay returns the target document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayKind {
    /// Body is the target document itself
    Raw,
    /// Body is JSON with the document in a `contents` field
    JsonEnvelope,
}

/// A relay endpoint template; `{url}` is replaced by the encoded target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relay {
    pub template: String,
    pub kind: RelayKind,
}

impl Relay {
    pub fn raw(template: &str) -> Self {
        Self {
            template: template.to_string(),
            kind: RelayKind::Raw,
        }
    }

    pub fn json_envelope(template: &str) -> Self {
        Self {
            template: template.to_string(),
            kind: RelayKind::JsonEnvelope,
        }
    }

    fn url_for(&self, target_url: &str) -> String {
        self.template
            .replace("{url}", &urlencoding::encode(target_url))
    }
}

/// Default relay chain
pub fn default_relays() -> Vec<Relay> {
    vec![
        Relay::raw("https://corsproxy.io/?{url}"),
        Relay::json_envelope("https://api.allorigins.win/get?url={url}"),
    ]
}

/// Configuration for [`ProxyFetcher`]
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub relays: Vec<Relay>,
    /// Bound applied to each relay attempt
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            relays: default_relays(),
            timeout: Duration::from_secs(RELAY_TIMEOUT_SECS),
            user_agent: "Mozilla/5.0 (compatible; MusicHub/1.0)".to_string(),
        }
    }
}

/// Anything that can turn a feed URL into its document text
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, NewsError>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    contents: Option<String>,
}

/// Fetches documents through the configured relay chain
pub struct ProxyFetcher {
    client: Client,
    config: ProxyConfig,
}

impl ProxyFetcher {
    /// Create a fetcher with the default relays
    pub fn new() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    pub fn with_config(config: ProxyConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    /// Retrieve `target_url` through the first relay that answers usefully.
    ///
    /// Returns [`NewsError::AllRelaysFailed`] when no relay produced a body;
    /// callers treat that as "this source yielded nothing".
    pub async fn fetch_via_proxy(&self, target_url: &str) -> Result<String, NewsError> {
        for relay in &self.config.relays {
            match self.try_relay(relay, target_url).await {
                Ok(body) => {
                    debug!(
                        "Fetched {} bytes for {} via {}",
                        body.len(),
                        target_url,
                        relay.template
                    );
                    return Ok(body);
                }
                Err(e) => {
                    debug!("Relay {} failed for {}: {}", relay.template, target_url, e);
                }
            }
        }

        Err(NewsError::AllRelaysFailed(target_url.to_string()))
    }

    async fn try_relay(&self, relay: &Relay, target_url: &str) -> Result<String, NewsError> {
        let url = relay.url_for(target_url);

        let attempt = async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

            if !response.status().is_success() {
                return Err(NewsError::ApiError {
                    status: response.status().as_u16(),
                    message: format!("Relay refused {}", target_url),
                });
            }

            response
                .text()
                .await
                .map_err(|e| NewsError::RequestFailed(e.to_string()))
        };

        let body = tokio::time::timeout(self.config.timeout, attempt)
            .await
            .map_err(|_| NewsError::Timeout(self.config.timeout.as_secs()))??;

        let body = match relay.kind {
            RelayKind::Raw => body,
            RelayKind::JsonEnvelope => unwrap_envelope(&body)?,
        };

        if body.trim().is_empty() {
            return Err(NewsError::ParseError("empty body".to_string()));
        }

        Ok(body)
    }
}

impl Default for ProxyFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for ProxyFetcher {
    async fn fetch(&self, url: &str) -> Result<String, NewsError> {
        self.fetch_via_proxy(url).await
    }
}

fn unwrap_envelope(body: &str) -> Result<String, NewsError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| NewsError::ParseError(format!("bad relay envelope: {}", e)))?;

    envelope
        .contents
        .ok_or_else(|| NewsError::ParseError("relay envelope has no contents".to_string()))
}
