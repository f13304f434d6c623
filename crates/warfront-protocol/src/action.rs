use serde::{Deserialize, Serialize};

use crate::{Coord, Direction};

/// One agent's submission for a tick. Fully serializable.
///
/// `Idle` is explicit so a replay log can distinguish "agent passed" from
/// "agent missing".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    Idle,
    Move {
        from: Coord,
        dir: Direction,
        /// Move a configured fraction of the source army instead of
        /// everything but one.
        split: bool,
    },
}

impl Action {
    /// Target cell of a move, `None` for idle.
    pub fn target(&self) -> Option<Coord> {
        match self {
            Action::Idle => None,
            Action::Move { from, dir, .. } => Some(*from + dir.offset()),
        }
    }
}
