use serde::{Deserialize, Serialize};

/// Agent ID is a simple index (max 16 agents per match).
///
/// The `Ord` impl matters: actions within a tick are applied in ascending
/// agent-id order to keep resolution deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u8);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}
