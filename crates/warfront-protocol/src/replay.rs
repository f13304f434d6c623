use serde::{Deserialize, Serialize};

use crate::{Action, AgentId};

/// Replay file schema version understood by this engine.
pub const REPLAY_VERSION: u32 = 1;

/// Everything needed to reproduce a match: the generation inputs plus the
/// ordered action stream. State snapshots are never stored; a replay is
/// always re-simulated from tick 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayFile {
    pub version: u32,
    pub seed: u64,
    /// Generation parameters, echoed verbatim so the grid can be rebuilt.
    pub grid_config: ReplayGridConfig,
    /// Engine parameters that affect resolution.
    pub engine_config: ReplayEngineConfig,
    #[serde(default)]
    pub agents: Vec<ReplayAgent>,
    #[serde(default)]
    pub ticks: Vec<ReplayTick>,
    /// FNV-1a hash of the final snapshot, used to detect divergence.
    pub final_hash: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayGridConfig {
    pub width: u32,
    pub height: u32,
    pub num_agents: u32,
    pub mountain_density: f32,
    pub city_density: f32,
    pub swamp_density: f32,
    pub min_general_distance: i32,
    pub max_retries: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayEngineConfig {
    pub max_ticks: u32,
    pub growth_interval: u32,
    pub split_ratio: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayAgent {
    pub id: AgentId,
    pub name: String,
}

/// One tick's submitted action map, explicit idles included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayTick {
    pub tick: u32,
    pub actions: Vec<ReplayAction>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayAction {
    pub agent: AgentId,
    pub action: Action,
}
