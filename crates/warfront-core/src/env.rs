//! Tick-level environment wrapper for driving matches from the outside,
//! shaped for learning-agent adapters: reset, step, per-agent observations,
//! terminated/truncated flags. Reward shaping is the adapter's business.

use std::collections::BTreeMap;

use warfront_protocol::{Action, AgentId, Event, Observation};

use crate::engine::{EngineConfig, EngineError, GameEngine};
use crate::gridgen::GridGenConfig;

/// What one environment step hands back.
#[derive(Clone, Debug)]
pub struct EnvStep {
    pub observations: BTreeMap<AgentId, Observation>,
    pub terminated: BTreeMap<AgentId, bool>,
    pub truncated: bool,
    pub events: Vec<Event>,
}

/// A resettable match wrapper around [`GameEngine`].
///
/// `reset` regenerates the world from a new seed with the same configs;
/// `step` is a thin forwarding layer that fans the fogged observations out.
#[derive(Clone, Debug)]
pub struct Environment {
    grid_config: GridGenConfig,
    engine_config: EngineConfig,
    names: Vec<String>,
    engine: GameEngine,
}

impl Environment {
    pub fn new(
        grid_config: GridGenConfig,
        engine_config: EngineConfig,
        names: Vec<String>,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let engine = GameEngine::new(grid_config.clone(), engine_config.clone(), &names, seed)?;
        Ok(Self {
            grid_config,
            engine_config,
            names,
            engine,
        })
    }

    /// Start a fresh match from `seed` and return the tick-0 observations.
    pub fn reset(&mut self, seed: u64) -> Result<BTreeMap<AgentId, Observation>, EngineError> {
        self.engine = GameEngine::new(
            self.grid_config.clone(),
            self.engine_config.clone(),
            &self.names,
            seed,
        )?;
        Ok(self.observe_all())
    }

    pub fn step(&mut self, actions: &BTreeMap<AgentId, Action>) -> EnvStep {
        let outcome = self.engine.step(actions);
        EnvStep {
            observations: self.observe_all(),
            terminated: outcome.terminated,
            truncated: outcome.truncated,
            events: outcome.events,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        (0..self.names.len()).map(|raw| AgentId(raw as u8)).collect()
    }

    fn observe_all(&self) -> BTreeMap<AgentId, Observation> {
        self.agent_ids()
            .into_iter()
            .map(|id| (id, self.engine.observe(id)))
            .collect()
    }
}
