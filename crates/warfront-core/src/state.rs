use thiserror::Error;

use warfront_protocol::{AgentId, AgentSnapshot, Coord, Snapshot};

use crate::grid::Grid;
use crate::gridgen::GeneratedGrid;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("agent count {agents} does not match general count {generals}")]
    AgentCountMismatch { agents: usize, generals: usize },
}

/// Per-agent bookkeeping. `land` and `army` are derived and recomputed after
/// every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentRecord {
    pub id: AgentId,
    pub name: String,
    pub alive: bool,
    /// Last known general position; kept after elimination.
    pub general: Coord,
    pub land: u32,
    pub army: u64,
}

/// Per-agent fog-of-war bookkeeping.
///
/// `visible` is recomputed from owned cells every tick; `explored` only ever
/// grows and backs the terrain-persistence fog policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentVisibility {
    visible: Vec<bool>,
    explored: Vec<bool>,
}

impl AgentVisibility {
    pub fn new(grid_len: usize) -> Self {
        Self {
            visible: vec![false; grid_len],
            explored: vec![false; grid_len],
        }
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn explored(&self) -> &[bool] {
        &self.explored
    }

    /// Replace the visible set, folding every newly seen cell into the
    /// explored set.
    pub fn refresh(&mut self, visible: Vec<bool>) {
        debug_assert_eq!(visible.len(), self.explored.len());
        for (explored, &now_visible) in self.explored.iter_mut().zip(&visible) {
            if now_visible {
                *explored = true;
            }
        }
        self.visible = visible;
    }
}

/// The authoritative mutable model: grid, agent records, tick counter, and
/// fog bookkeeping. Mutated exclusively by the turn engine.
#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub agents: Vec<AgentRecord>,
    pub tick: u32,
    pub visibility: Vec<AgentVisibility>,
}

impl GameState {
    /// Build tick-0 state from a validated grid: each general cell starts
    /// owned by its agent with army 1, everything else neutral.
    pub fn from_generated(generated: GeneratedGrid, names: &[String]) -> Result<Self, SetupError> {
        let GeneratedGrid { mut grid, generals } = generated;

        if names.len() != generals.len() {
            return Err(SetupError::AgentCountMismatch {
                agents: names.len(),
                generals: generals.len(),
            });
        }

        let mut agents = Vec::with_capacity(generals.len());
        for (raw, (&at, name)) in generals.iter().zip(names).enumerate() {
            let id = AgentId(raw as u8);
            let cell = grid.get_mut(at).expect("general in-bounds");
            cell.owner = Some(id);
            cell.army = 1;
            agents.push(AgentRecord {
                id,
                name: name.clone(),
                alive: true,
                general: at,
                land: 1,
                army: 1,
            });
        }

        let grid_len = grid.len();
        Ok(Self {
            grid,
            agents,
            tick: 0,
            visibility: (0..generals.len())
                .map(|_| AgentVisibility::new(grid_len))
                .collect(),
        })
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentRecord> {
        self.agents.get(id.0 as usize)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentRecord> {
        self.agents.get_mut(id.0 as usize)
    }

    pub fn alive_ids(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|a| a.alive)
            .map(|a| a.id)
            .collect()
    }

    /// Recompute the derived land/army tallies from the grid.
    pub fn recompute_totals(&mut self) {
        for agent in &mut self.agents {
            agent.land = 0;
            agent.army = 0;
        }
        for cell in self.grid.cells() {
            if let Some(owner) = cell.owner {
                if let Some(agent) = self.agents.get_mut(owner.0 as usize) {
                    agent.land += 1;
                    agent.army += u64::from(cell.army);
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            grid: self.grid.snapshot(),
            agents: self
                .agents
                .iter()
                .map(|a| AgentSnapshot {
                    id: a.id,
                    name: a.name.clone(),
                    alive: a.alive,
                    general: a.general,
                    land: a.land,
                    army: a.army,
                })
                .collect(),
            alive: self.alive_ids(),
        }
    }
}
