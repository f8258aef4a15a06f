//! Remote agent registry and dispatch client

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::card::{AgentCard, AGENT_CARD_PATH};
use crate::error::DispatchError;
use crate::message::{reply_text, OutboundMessage, SendMessageRequest};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// A registered remote agent endpoint.
///
/// `card` is `None` until the first successful discovery fetch. That state
/// is distinct from a fetch failure, which leaves the entry untouched.
#[derive(Debug, Clone)]
struct RemoteAgentEntry {
    url: String,
    card: Option<Value>,
}

/// Client for discovering and messaging remote agents.
///
/// Keeps an insertion-ordered registry of known endpoints with lazily cached
/// discovery documents, and dispatches single text messages to an endpoint,
/// returning the extracted reply text.
///
/// All operations take `&self`; the registry lock is never held across an
/// await, so concurrent dispatches and listings are safe. Two listings
/// racing on the same uncached endpoint may fetch it twice and overwrite
/// the slot with equivalent data.
pub struct A2aClient {
    http: reqwest::Client,
    timeout: Duration,
    agents: Mutex<Vec<RemoteAgentEntry>>,
}

impl A2aClient {
    /// Create a client with the default 120 second request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit total request timeout, applied to
    /// every outbound call
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .user_agent(format!("a2a-relay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            timeout,
            agents: Mutex::new(Vec::new()),
        })
    }

    /// Add an endpoint to the set of known remote agents.
    ///
    /// Idempotent: re-registering a known endpoint keeps any cached
    /// discovery document. Performs no network I/O.
    pub fn register(&self, url: &str) {
        let normalized = normalize_url(url);
        let mut agents = self.agents.lock().unwrap();
        if !agents.iter().any(|entry| entry.url == normalized) {
            agents.push(RemoteAgentEntry {
                url: normalized.to_string(),
                card: None,
            });
        }
    }

    /// Remove an endpoint from the set of known remote agents.
    ///
    /// Removing an unknown endpoint is a no-op.
    pub fn deregister(&self, url: &str) {
        let normalized = normalize_url(url);
        self.agents.lock().unwrap().retain(|entry| entry.url != normalized);
    }

    /// List the discovery documents of all registered agents, in
    /// registration order.
    ///
    /// Cached documents are returned as-is. Endpoints not yet described are
    /// fetched one at a time and cached on success; an endpoint that fails
    /// to fetch or parse is logged and omitted from the result, but stays
    /// registered and is retried on the next call.
    pub async fn list_agents(&self) -> Vec<Value> {
        let snapshot: Vec<RemoteAgentEntry> = self.agents.lock().unwrap().clone();

        let mut cards = Vec::with_capacity(snapshot.len());
        for entry in snapshot {
            if let Some(card) = entry.card {
                cards.push(card);
                continue;
            }
            match self.fetch_card_document(&entry.url).await {
                Ok(card) => {
                    let mut agents = self.agents.lock().unwrap();
                    if let Some(slot) = agents.iter_mut().find(|e| e.url == entry.url) {
                        slot.card = Some(card.clone());
                    }
                    cards.push(card);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch agent card from {}: {}", entry.url, e);
                }
            }
        }
        cards
    }

    /// Send a text message to the agent at `url` and return the reply text.
    ///
    /// The endpoint's discovery document is always fetched fresh, regardless
    /// of cache state. When the reply carries no textual artifact part, the
    /// whole response is returned serialized instead; only discovery,
    /// timeout, and transport failures surface as errors.
    pub async fn dispatch(&self, url: &str, message: &str) -> Result<String, DispatchError> {
        let endpoint = normalize_url(url);
        validate_endpoint(endpoint)?;

        let card = self.fetch_card(endpoint).await?;
        // The card names the endpoint messages should go to; minimal cards
        // leave it empty, in which case the registered URL is used.
        let target = if card.url.is_empty() {
            endpoint.to_string()
        } else {
            card.url.clone()
        };

        let request = SendMessageRequest::new(OutboundMessage::user(message));
        tracing::debug!(
            "Dispatching message {} to {} ({})",
            request.params.message.message_id,
            card.name,
            target
        );

        let response = self
            .http
            .post(&target)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.send_error(&target, e))?
            .error_for_status()
            .map_err(|e| self.send_error(&target, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| self.send_error(&target, e))?;

        Ok(extract_reply(&target, &body))
    }

    /// Fetch and decode an endpoint's agent card
    async fn fetch_card(&self, url: &str) -> Result<AgentCard, DispatchError> {
        let response = self
            .http
            .get(format!("{}{}", url, AGENT_CARD_PATH))
            .send()
            .await
            .map_err(|e| DispatchError::Discovery {
                url: url.to_string(),
                source: e,
            })?
            .error_for_status()
            .map_err(|e| DispatchError::Discovery {
                url: url.to_string(),
                source: e,
            })?;

        response.json().await.map_err(|e| DispatchError::Discovery {
            url: url.to_string(),
            source: e,
        })
    }

    /// Fetch an endpoint's discovery document as an opaque value for the
    /// listing cache
    async fn fetch_card_document(&self, url: &str) -> Result<Value, reqwest::Error> {
        self.http
            .get(format!("{}{}", url, AGENT_CARD_PATH))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    fn send_error(&self, url: &str, source: reqwest::Error) -> DispatchError {
        if source.is_timeout() {
            DispatchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            DispatchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Strip trailing slashes so URL variants map to one registry entry
fn normalize_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

fn validate_endpoint(url: &str) -> Result<(), DispatchError> {
    let parsed = url::Url::parse(url).map_err(|e| DispatchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(DispatchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported URL scheme {:?}", parsed.scheme()),
        });
    }
    Ok(())
}

/// Pull the reply text out of a response body.
///
/// Falls back to the serialized response when the expected artifact
/// structure is missing, and to the raw body when it is not JSON at all.
/// Shape surprises never fail the dispatch.
fn extract_reply(url: &str, body: &str) -> String {
    let response: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Response from {} is not JSON ({}); returning raw body", url, e);
            return body.to_string();
        }
    };

    if let Some(text) = reply_text(&response) {
        return text;
    }

    tracing::warn!(
        "Response from {} has no textual artifact part; returning full response",
        url
    );
    serde_json::to_string_pretty(&response).unwrap_or_else(|_| body.to_string())
}
