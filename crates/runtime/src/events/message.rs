//! Messages a remote session sends to the authoritative one.

use serde::{Deserialize, Serialize};

use progression_core::{CharacterId, Tick, XpGrant};

use crate::api::{Result, RuntimeError};

/// Outbound request queued by a non-authoritative session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Experience the authoritative side should resolve for `character`.
    ForwardExperience {
        character: CharacterId,
        grant: XpGrant,
        tick: Tick,
    },
}

impl OutboundMessage {
    /// JSON wire encoding.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| RuntimeError::Message(e.to_string()))
    }

    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| RuntimeError::Message(e.to_string()))
    }

    pub fn character(&self) -> CharacterId {
        match self {
            Self::ForwardExperience { character, .. } => *character,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progression_core::XpSource;

    #[test]
    fn wire_format_is_tagged() {
        let message = OutboundMessage::ForwardExperience {
            character: CharacterId(4),
            grant: XpGrant::kill(XpSource::Boss, 300, 22),
            tick: Tick(90),
        };
        let json = message.encode().unwrap();
        assert!(json.contains(r#""type":"forward_experience""#));
        assert_eq!(OutboundMessage::decode(&json).unwrap(), message);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            OutboundMessage::decode("{\"type\":\"teleport\"}"),
            Err(RuntimeError::Message(_))
        ));
    }
}
