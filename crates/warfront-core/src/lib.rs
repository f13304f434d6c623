pub mod agents;
mod config;
mod engine;
mod env;
mod fog;
mod grid;
pub mod gridgen;
mod replay;
mod rng;
pub mod selfplay;
mod state;

pub use crate::config::*;
pub use crate::engine::*;
pub use crate::env::*;
pub use crate::fog::*;
pub use crate::grid::*;
pub use crate::gridgen::{generate_grid, GeneratedGrid, GridGenConfig, GridGenError};
pub use crate::replay::*;
pub use crate::rng::*;
pub use crate::selfplay::{
    run_batch_selfplay, run_selfplay, AgentKind, AgentStats, AggregateMetrics,
    BatchSelfPlayResult, MatchMetrics, MatchOutcome, SelfPlayConfig, SelfPlayResult,
};
pub use crate::state::*;
