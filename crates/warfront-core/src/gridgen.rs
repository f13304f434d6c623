//! Procedural battlefield generation.
//!
//! Terrain is placed with seeded draws; generals are placed by rejection
//! sampling and the whole grid is discarded and regenerated if the
//! connectivity check fails.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use warfront_protocol::{Coord, TerrainKind};

use crate::grid::Grid;
use crate::rng::GameRng;

/// Configuration for grid generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGenConfig {
    pub width: u32,
    pub height: u32,
    pub num_agents: u32,
    /// Fraction of cells that become mountains (0.0-1.0).
    pub mountain_density: f32,
    /// Fraction of cells that become neutral cities (0.0-1.0).
    pub city_density: f32,
    /// Fraction of cells that become swamps (0.0-1.0).
    pub swamp_density: f32,
    /// Minimum Manhattan distance between any two generals.
    pub min_general_distance: i32,
    /// How many whole-grid regenerations to attempt before giving up.
    pub max_retries: u32,
}

impl Default for GridGenConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 24,
            num_agents: 2,
            mountain_density: 0.2,
            city_density: 0.03,
            swamp_density: 0.0,
            min_general_distance: 8,
            max_retries: 50,
        }
    }
}

/// Hard cap on agents per match; agent ids are a single byte and per-tick
/// resolution walks them in ascending order.
pub const MAX_AGENTS: u32 = 16;

/// Candidate draws per regeneration when sampling general positions.
const GENERAL_DRAW_BUDGET: u32 = 1000;

/// Neutral city garrisons start in this range (inclusive lower bound).
const CITY_GARRISON_BASE: u32 = 40;
const CITY_GARRISON_SPREAD: u32 = 10;

#[derive(Debug, Error)]
pub enum GridGenError {
    #[error("grid dimensions {width}x{height} are too small")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("terrain densities must each be in [0, 1) and sum below 1")]
    InvalidDensity,
    #[error("agent count {0} outside supported range 2..={MAX_AGENTS}")]
    InvalidAgentCount(u32),
    #[error("minimum general distance must be at least 1, got {0}")]
    InvalidSeparation(i32),
    #[error("could not satisfy separation and connectivity constraints after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// Result of grid generation: a validated grid plus the general positions,
/// in agent-id order.
#[derive(Clone, Debug)]
pub struct GeneratedGrid {
    pub grid: Grid,
    pub generals: Vec<Coord>,
}

/// Generate a grid satisfying the separation and connectivity invariants.
///
/// Identical seed and config always produce an identical grid; the replay
/// format depends on this.
pub fn generate_grid(config: &GridGenConfig, seed: u64) -> Result<GeneratedGrid, GridGenError> {
    validate_config(config)?;

    let mut rng = GameRng::seed_from_u64(seed);

    for _attempt in 0..config.max_retries {
        let mut grid = draw_terrain(config, &mut rng);

        let Some(generals) = place_generals(config, &grid, &mut rng) else {
            continue;
        };

        if !generals_connected(&grid, &generals) {
            continue;
        }

        for &at in &generals {
            let cell = grid.get_mut(at).expect("general in-bounds");
            cell.terrain = TerrainKind::General;
            cell.army = 0;
        }

        return Ok(GeneratedGrid { grid, generals });
    }

    Err(GridGenError::RetriesExhausted {
        retries: config.max_retries,
    })
}

fn validate_config(config: &GridGenConfig) -> Result<(), GridGenError> {
    if config.width < 2 || config.height < 2 {
        return Err(GridGenError::InvalidDimensions {
            width: config.width,
            height: config.height,
        });
    }
    let densities = [
        config.mountain_density,
        config.city_density,
        config.swamp_density,
    ];
    if densities.iter().any(|d| !(0.0..1.0).contains(d)) || densities.iter().sum::<f32>() >= 1.0 {
        return Err(GridGenError::InvalidDensity);
    }
    if config.num_agents < 2 || config.num_agents > MAX_AGENTS {
        return Err(GridGenError::InvalidAgentCount(config.num_agents));
    }
    if config.min_general_distance < 1 {
        return Err(GridGenError::InvalidSeparation(config.min_general_distance));
    }
    Ok(())
}

fn draw_terrain(config: &GridGenConfig, rng: &mut GameRng) -> Grid {
    let mut grid = Grid::new(config.width, config.height, TerrainKind::Plain);

    for index in 0..grid.len() {
        let roll = rng.next_f32();
        let cell = grid.cell_mut(index);
        if roll < config.mountain_density {
            cell.terrain = TerrainKind::Mountain;
        } else if roll < config.mountain_density + config.city_density {
            cell.terrain = TerrainKind::City;
            cell.army = CITY_GARRISON_BASE + rng.gen_range_u32(CITY_GARRISON_SPREAD);
        } else if roll < config.mountain_density + config.city_density + config.swamp_density {
            cell.terrain = TerrainKind::Swamp;
        }
    }

    grid
}

/// Rejection-sample general positions: plain cells only, every pair at least
/// `min_general_distance` apart. Returns `None` when the draw budget runs
/// out, which sends the caller back for a fresh grid.
fn place_generals(config: &GridGenConfig, grid: &Grid, rng: &mut GameRng) -> Option<Vec<Coord>> {
    let mut generals: Vec<Coord> = Vec::with_capacity(config.num_agents as usize);

    for _ in 0..GENERAL_DRAW_BUDGET {
        let candidate = Coord {
            x: rng.gen_range_u32(config.width) as i32,
            y: rng.gen_range_u32(config.height) as i32,
        };

        let cell = grid.get(candidate)?;
        if cell.terrain != TerrainKind::Plain {
            continue;
        }
        if generals
            .iter()
            .any(|g| g.manhattan(candidate) < config.min_general_distance)
        {
            continue;
        }

        generals.push(candidate);
        if generals.len() == config.num_agents as usize {
            return Some(generals);
        }
    }

    None
}

/// Breadth-first reachability over passable cells starting from the first
/// general; all others must be reached.
fn generals_connected(grid: &Grid, generals: &[Coord]) -> bool {
    let Some(&start) = generals.first() else {
        return false;
    };
    let Some(start_index) = grid.index_of(start) else {
        return false;
    };

    let mut seen = vec![false; grid.len()];
    seen[start_index] = true;
    let mut queue = VecDeque::from([start_index]);

    while let Some(index) = queue.pop_front() {
        for neighbor in grid.neighbors4_indices(index).into_iter().flatten() {
            if seen[neighbor] || !grid.cell(neighbor).terrain.passable() {
                continue;
            }
            seen[neighbor] = true;
            queue.push_back(neighbor);
        }
    }

    generals.iter().all(|g| {
        grid.index_of(*g)
            .map(|index| seen[index])
            .unwrap_or(false)
    })
}
