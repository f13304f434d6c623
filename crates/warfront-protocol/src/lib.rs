mod action;
mod coord;
mod event;
mod ids;
mod replay;
mod snapshot;
pub mod wire;

pub use crate::action::*;
pub use crate::coord::*;
pub use crate::event::*;
pub use crate::ids::*;
pub use crate::replay::*;
pub use crate::snapshot::*;
pub use crate::wire::{snapshot_hash, WireError};
