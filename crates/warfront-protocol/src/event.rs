use serde::{Deserialize, Serialize};

use crate::{AgentId, Coord};

/// Why a submitted action was demoted to idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Source cell is outside the grid.
    OutOfBounds,
    /// Source cell is not owned by the acting agent.
    NotOwned,
    /// Source army is 1 or less; nothing can depart.
    InsufficientArmy,
    /// Target cell is a mountain.
    MountainTarget,
    /// Target cell is outside the grid.
    TargetOutOfBounds,
    /// The acting agent was already eliminated.
    Eliminated,
}

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// One agent eliminated every rival.
    Conquest,
    /// Tick limit reached, or no agent left alive. Not a decisive win.
    Truncation,
}

/// All sim→caller events. Fully serializable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TickCompleted {
        tick: u32,
    },
    CellCaptured {
        at: Coord,
        by: AgentId,
        from: Option<AgentId>,
    },
    GeneralCaptured {
        at: Coord,
        by: AgentId,
        victim: AgentId,
    },
    AgentEliminated {
        agent: AgentId,
        by: AgentId,
    },
    /// Warning-level diagnostic: the action was treated as idle and the tick
    /// proceeded for everyone else.
    ActionRejected {
        agent: AgentId,
        tick: u32,
        reason: RejectReason,
    },
    GameEnded {
        winner: Option<AgentId>,
        reason: EndReason,
    },
}
