//! Replay export and re-simulation.
//!
//! A replay stores the generation seed, both configs, and the ordered action
//! log. Seeking never snapshots intermediate state: the engine is rebuilt
//! from the seed and stepped forward, which stays correct as long as the
//! simulation is deterministic. The final state hash catches the cases where
//! it is not.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use warfront_protocol::{
    snapshot_hash, AgentId, ReplayAgent, ReplayEngineConfig, ReplayFile, ReplayGridConfig,
    WireError, REPLAY_VERSION,
};

use crate::engine::{EngineConfig, EngineError, GameEngine};
use crate::fog::FogPolicy;
use crate::gridgen::GridGenConfig;
use crate::state::GameState;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("unsupported replay version {found}, expected {REPLAY_VERSION}")]
    UnsupportedVersion { found: u32 },
    #[error("requested tick {requested} beyond recorded tick {max}")]
    TickOutOfRange { requested: u32, max: u32 },
    #[error("action log out of sequence: expected tick {expected}, found {found}")]
    OutOfSync { expected: u32, found: u32 },
    #[error("replay diverged: final hash {expected:#018x} recorded, {actual:#018x} resimulated")]
    Diverged { expected: u64, actual: u64 },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Capture the finished (or in-progress) match as a self-contained replay.
pub fn export_replay(engine: &GameEngine) -> Result<ReplayFile, ReplayError> {
    let final_hash = snapshot_hash(&engine.snapshot())?;
    Ok(ReplayFile {
        version: REPLAY_VERSION,
        seed: engine.seed(),
        grid_config: grid_config_out(engine.grid_config()),
        engine_config: engine_config_out(engine.config()),
        agents: engine
            .agent_names()
            .iter()
            .enumerate()
            .map(|(raw, name)| ReplayAgent {
                id: AgentId(raw as u8),
                name: name.clone(),
            })
            .collect(),
        ticks: engine.action_log.clone(),
        final_hash,
    })
}

/// Re-simulate up to and including `tick` (0 means the initial state) and
/// return the reconstructed state.
pub fn replay_to(file: &ReplayFile, tick: u32) -> Result<GameState, ReplayError> {
    let engine = resimulate(file, Some(tick))?;
    Ok(engine.state().clone())
}

/// Re-simulate the whole log and check the final state hash.
pub fn verify_replay(file: &ReplayFile) -> Result<(), ReplayError> {
    let engine = resimulate(file, None)?;
    let actual = snapshot_hash(&engine.snapshot())?;
    if actual != file.final_hash {
        return Err(ReplayError::Diverged {
            expected: file.final_hash,
            actual,
        });
    }
    Ok(())
}

fn resimulate(file: &ReplayFile, stop_at: Option<u32>) -> Result<GameEngine, ReplayError> {
    if file.version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: file.version,
        });
    }
    let max = file.ticks.len() as u32;
    if let Some(target) = stop_at {
        if target > max {
            return Err(ReplayError::TickOutOfRange {
                requested: target,
                max,
            });
        }
    }

    let names: Vec<String> = file.agents.iter().map(|a| a.name.clone()).collect();
    let mut engine = GameEngine::new(
        grid_config_in(&file.grid_config),
        engine_config_in(&file.engine_config),
        &names,
        file.seed,
    )?;

    let target = stop_at.unwrap_or(max);
    for (i, recorded) in file.ticks.iter().take(target as usize).enumerate() {
        let expected = i as u32 + 1;
        if recorded.tick != expected {
            return Err(ReplayError::OutOfSync {
                expected,
                found: recorded.tick,
            });
        }
        let actions: BTreeMap<_, _> = recorded
            .actions
            .iter()
            .map(|ra| (ra.agent, ra.action))
            .collect();
        engine.step(&actions);
    }

    debug!(tick = engine.state().tick, "replay reconstructed");
    Ok(engine)
}

fn grid_config_out(config: &GridGenConfig) -> ReplayGridConfig {
    ReplayGridConfig {
        width: config.width,
        height: config.height,
        num_agents: config.num_agents,
        mountain_density: config.mountain_density,
        city_density: config.city_density,
        swamp_density: config.swamp_density,
        min_general_distance: config.min_general_distance,
        max_retries: config.max_retries,
    }
}

fn grid_config_in(config: &ReplayGridConfig) -> GridGenConfig {
    GridGenConfig {
        width: config.width,
        height: config.height,
        num_agents: config.num_agents,
        mountain_density: config.mountain_density,
        city_density: config.city_density,
        swamp_density: config.swamp_density,
        min_general_distance: config.min_general_distance,
        max_retries: config.max_retries,
    }
}

fn engine_config_out(config: &EngineConfig) -> ReplayEngineConfig {
    ReplayEngineConfig {
        max_ticks: config.max_ticks,
        growth_interval: config.growth_interval,
        split_ratio: config.split_ratio,
    }
}

// Fog is presentation-only and never changes state evolution, so replays
// reconstruct with the default policy.
fn engine_config_in(config: &ReplayEngineConfig) -> EngineConfig {
    EngineConfig {
        max_ticks: config.max_ticks,
        growth_interval: config.growth_interval,
        split_ratio: config.split_ratio,
        fog: FogPolicy::default(),
    }
}
