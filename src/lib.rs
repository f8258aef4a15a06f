//! a2a-relay - discover and message remote A2A agents
//!
//! Remote agents advertise themselves with a discovery document served at
//! `/.well-known/agent.json` and accept text messages over a JSON-RPC 2.0
//! `message/send` call. This crate keeps a registry of known endpoints,
//! lazily caches each endpoint's discovery document, and dispatches single
//! text messages, returning the extracted reply text.
//!
//! # Example
//!
//! ```no_run
//! use a2a_relay::A2aClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = A2aClient::new()?;
//!     client.register("http://localhost:10000");
//!     client.register("http://localhost:10001");
//!
//!     // Discovery documents are fetched lazily and cached
//!     for card in client.list_agents().await {
//!         println!("{}", card["name"]);
//!     }
//!
//!     let reply = client
//!         .dispatch("http://localhost:10000", "I want to book a flight to Bern.")
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod card;
mod client;
mod config;
mod error;
mod message;

// Re-export the public API
pub use card::{AgentCapabilities, AgentCard, AgentSkill, AGENT_CARD_PATH};
pub use client::A2aClient;
pub use config::{AgentsSettings, ClientSettings, Config};
pub use error::DispatchError;
pub use message::{
    reply_text, MessageSendParams, OutboundMessage, Part, Role, SendMessageRequest,
    MESSAGE_SEND_METHOD,
};
