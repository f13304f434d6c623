use serde::{Deserialize, Serialize};

use crate::{AgentId, Coord};

/// Terrain kind of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Plain,
    Mountain,
    City,
    General,
    Swamp,
}

impl TerrainKind {
    /// Mountains block both movement and ownership.
    #[inline]
    pub fn passable(self) -> bool {
        !matches!(self, TerrainKind::Mountain)
    }

    /// Cities and generals grow one army every tick while owned.
    #[inline]
    pub fn fast_growth(self) -> bool {
        matches!(self, TerrainKind::City | TerrainKind::General)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub terrain: TerrainKind,
    pub owner: Option<AgentId>,
    pub army: u32,
}

/// Row-major cell grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub name: String,
    pub alive: bool,
    /// Last known general position; kept after elimination for scoring.
    pub general: Coord,
    /// Owned-cell count, recomputed after every tick.
    pub land: u32,
    /// Total army across owned cells, recomputed after every tick.
    pub army: u64,
}

/// Full unmasked game state, used for determinism hashing and replay
/// verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u32,
    pub grid: GridSnapshot,
    pub agents: Vec<AgentSnapshot>,
    pub alive: Vec<AgentId>,
}

/// One cell as seen through an agent's fog of war.
///
/// `None` fields are unknown to the observer. A remembered cell (seen before,
/// not currently visible) may carry terrain but no owner or army.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub terrain: Option<TerrainKind>,
    pub owner: Option<AgentId>,
    pub army: Option<u32>,
    pub visible: bool,
}

impl CellView {
    pub const UNKNOWN: CellView = CellView {
        terrain: None,
        owner: None,
        army: None,
        visible: false,
    };
}

/// Per-agent masked observation for one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub tick: u32,
    pub width: u32,
    pub height: u32,
    /// Row-major, same layout as `GridSnapshot::cells`.
    pub cells: Vec<CellView>,
    pub me: AgentSnapshot,
    pub alive: Vec<AgentId>,
    pub done: bool,
}

impl Observation {
    pub fn cell(&self, at: Coord) -> Option<&CellView> {
        if at.x < 0 || at.y < 0 || at.x >= self.width as i32 || at.y >= self.height as i32 {
            return None;
        }
        let index = at.y as usize * self.width as usize + at.x as usize;
        self.cells.get(index)
    }
}
