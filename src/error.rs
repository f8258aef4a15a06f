//! Error types for agent discovery and dispatch

use std::time::Duration;

use thiserror::Error;

/// Failure modes of [`A2aClient::dispatch`](crate::A2aClient::dispatch).
///
/// A reply that lacks the expected artifact structure is deliberately not
/// represented here: the dispatcher logs it and returns the serialized
/// response instead of failing the call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The endpoint URL could not be parsed, or uses a scheme other than
    /// http/https.
    #[error("invalid agent endpoint {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The endpoint was unreachable, or returned an undecodable discovery
    /// document.
    #[error("failed to discover agent at {url}")]
    Discovery {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response arrived within the configured deadline.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Connection-level or HTTP-status failure while sending the message.
    #[error("transport failure sending message to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
