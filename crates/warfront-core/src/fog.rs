use serde::{Deserialize, Serialize};

use warfront_protocol::{AgentId, CellView, Observation};

use crate::grid::Grid;
use crate::state::GameState;

/// What an agent keeps knowing about cells its visibility has retreated from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FogPolicy {
    /// Previously seen cells keep their terrain kind; owner and army stay
    /// hidden.
    #[default]
    RememberTerrain,
    /// Out-of-sight cells are fully unknown, seen before or not.
    Strict,
}

/// Cells within Chebyshev distance 1 of any cell owned by `agent`.
pub fn visibility_mask(grid: &Grid, agent: AgentId) -> Vec<bool> {
    let mut mask = vec![false; grid.len()];
    for index in 0..grid.len() {
        if grid.cell(index).owner != Some(agent) {
            continue;
        }
        mask[index] = true;
        for neighbor in grid.neighbors8_indices(index) {
            mask[neighbor] = true;
        }
    }
    mask
}

/// Recompute every agent's visible set from the current grid, growing the
/// explored sets as a side effect. Called once per tick after resolution.
pub fn refresh_visibility(state: &mut GameState) {
    for raw in 0..state.agents.len() {
        let mask = visibility_mask(&state.grid, AgentId(raw as u8));
        state.visibility[raw].refresh(mask);
    }
}

/// Render `state` as seen by `agent`. Pure: never mutates the state.
///
/// Eliminated agents get a fully masked view. `Observation::done` reports
/// per-agent termination only; the caller overrides it when the whole match
/// ends.
pub fn view(state: &GameState, agent: AgentId, policy: FogPolicy) -> Observation {
    let record = state.agent(agent).expect("known agent");
    let me = warfront_protocol::AgentSnapshot {
        id: record.id,
        name: record.name.clone(),
        alive: record.alive,
        general: record.general,
        land: record.land,
        army: record.army,
    };

    let cells = if record.alive {
        let vis = &state.visibility[agent.0 as usize];
        state
            .grid
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                if vis.visible()[index] {
                    CellView {
                        terrain: Some(cell.terrain),
                        owner: cell.owner,
                        army: Some(cell.army),
                        visible: true,
                    }
                } else if policy == FogPolicy::RememberTerrain && vis.explored()[index] {
                    CellView {
                        terrain: Some(cell.terrain),
                        owner: None,
                        army: None,
                        visible: false,
                    }
                } else {
                    CellView::UNKNOWN
                }
            })
            .collect()
    } else {
        vec![CellView::UNKNOWN; state.grid.len()]
    };

    Observation {
        tick: state.tick,
        width: state.grid.width(),
        height: state.grid.height(),
        cells,
        me,
        alive: state.alive_ids(),
        done: !record.alive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::state::{AgentRecord, AgentVisibility};
    use warfront_protocol::{Coord, TerrainKind};

    fn two_agent_state() -> GameState {
        let mut grid = Grid::new(6, 6, TerrainKind::Plain);
        for (at, id) in [
            (Coord { x: 0, y: 0 }, AgentId(0)),
            (Coord { x: 5, y: 5 }, AgentId(1)),
        ] {
            let cell = grid.get_mut(at).unwrap();
            cell.terrain = TerrainKind::General;
            cell.owner = Some(id);
            cell.army = 5;
        }
        let grid_len = grid.len();
        let mut state = GameState {
            grid,
            agents: vec![
                AgentRecord {
                    id: AgentId(0),
                    name: "a".into(),
                    alive: true,
                    general: Coord { x: 0, y: 0 },
                    land: 1,
                    army: 5,
                },
                AgentRecord {
                    id: AgentId(1),
                    name: "b".into(),
                    alive: true,
                    general: Coord { x: 5, y: 5 },
                    land: 1,
                    army: 5,
                },
            ],
            tick: 0,
            visibility: vec![AgentVisibility::new(grid_len), AgentVisibility::new(grid_len)],
        };
        refresh_visibility(&mut state);
        state
    }

    #[test]
    fn mask_covers_owned_cell_and_ring() {
        let state = two_agent_state();
        let mask = visibility_mask(&state.grid, AgentId(0));
        let visible: Vec<Coord> = mask
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(|(i, _)| state.grid.coord_at_index(i).unwrap())
            .collect();
        // Corner general: itself plus 3 in-bounds neighbors.
        assert_eq!(visible.len(), 4);
        let origin = Coord { x: 0, y: 0 };
        assert!(visible.iter().all(|c| origin.chebyshev(*c) <= 1));
    }

    #[test]
    fn distant_cells_never_reveal_army() {
        let state = two_agent_state();
        let obs = view(&state, AgentId(0), FogPolicy::RememberTerrain);
        let enemy_general = obs.cell(Coord { x: 5, y: 5 }).unwrap();
        assert!(!enemy_general.visible);
        assert_eq!(enemy_general.army, None);
        assert_eq!(enemy_general.owner, None);
    }

    #[test]
    fn visible_cells_report_full_state() {
        let state = two_agent_state();
        let obs = view(&state, AgentId(1), FogPolicy::Strict);
        let own = obs.cell(Coord { x: 5, y: 5 }).unwrap();
        assert!(own.visible);
        assert_eq!(own.terrain, Some(TerrainKind::General));
        assert_eq!(own.owner, Some(AgentId(1)));
        assert_eq!(own.army, Some(5));
    }

    #[test]
    fn remember_terrain_keeps_explored_terrain_but_hides_army() {
        let mut state = two_agent_state();
        // Agent 0 loses its cell; visibility retreats everywhere.
        state.grid.get_mut(Coord { x: 0, y: 0 }).unwrap().owner = Some(AgentId(1));
        refresh_visibility(&mut state);

        let remembered = view(&state, AgentId(0), FogPolicy::RememberTerrain);
        let cell = remembered.cell(Coord { x: 0, y: 0 }).unwrap();
        assert!(!cell.visible);
        assert_eq!(cell.terrain, Some(TerrainKind::General));
        assert_eq!(cell.army, None);

        let strict = view(&state, AgentId(0), FogPolicy::Strict);
        assert_eq!(
            strict.cell(Coord { x: 0, y: 0 }).unwrap(),
            &CellView::UNKNOWN
        );
    }

    #[test]
    fn eliminated_agent_sees_nothing() {
        let mut state = two_agent_state();
        state.agents[0].alive = false;
        let obs = view(&state, AgentId(0), FogPolicy::RememberTerrain);
        assert!(obs.done);
        assert!(obs.cells.iter().all(|c| *c == CellView::UNKNOWN));
    }
}
