//! Typed model of the agent discovery document
//!
//! Remote agents describe themselves with a small JSON card served at a
//! well-known path. Every field except `name` is defaulted so that minimal
//! cards decode cleanly; the registry cache keeps the raw document and only
//! dispatch and display code go through these types.

use serde::{Deserialize, Serialize};

/// Well-known path of the discovery document, relative to the agent endpoint
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// A remote agent's self-description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Endpoint messages should be sent to. May differ from the URL the card
    /// was fetched from (e.g. a public host override behind a proxy).
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    /// Content types the agent accepts (e.g. "text", "text/plain")
    #[serde(default)]
    pub default_input_modes: Vec<String>,
    /// Content types the agent produces
    #[serde(default)]
    pub default_output_modes: Vec<String>,
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

/// Optional protocol features an agent supports
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

/// A single advertised skill of an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_full_card() {
        let card: AgentCard = serde_json::from_value(json!({
            "name": "flight_booking_agent",
            "description": "Helps with booking flights",
            "url": "http://localhost:10000/",
            "version": "1.0.0",
            "capabilities": { "streaming": true },
            "defaultInputModes": ["text", "text/plain"],
            "defaultOutputModes": ["text", "text/plain"],
            "skills": [{
                "id": "create_flight_booking",
                "name": "Flight Booking Tool",
                "description": "Helps with booking flights",
                "tags": ["flight booking creation"],
                "examples": ["I want to book a flight to Bern."]
            }]
        }))
        .unwrap();

        assert_eq!(card.name, "flight_booking_agent");
        assert_eq!(card.version, "1.0.0");
        assert!(card.capabilities.streaming);
        assert!(!card.capabilities.push_notifications);
        assert_eq!(card.default_input_modes, vec!["text", "text/plain"]);
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.skills[0].id, "create_flight_booking");
    }

    #[test]
    fn test_parse_minimal_card() {
        let card: AgentCard = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert_eq!(card.name, "x");
        assert!(card.url.is_empty());
        assert!(!card.capabilities.streaming);
        assert!(card.skills.is_empty());
    }

    #[test]
    fn test_card_without_name_is_rejected() {
        let result = serde_json::from_value::<AgentCard>(json!({ "version": "1.0.0" }));
        assert!(result.is_err());
    }
}
