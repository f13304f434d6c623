use serde::{Deserialize, Serialize};

use warfront_protocol::{AgentId, CellSnapshot, Coord, GridSnapshot, TerrainKind};

/// One cell of the battlefield.
///
/// Invariant: mountains are never owned and always carry army 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: TerrainKind,
    pub owner: Option<AgentId>,
    pub army: u32,
}

impl Cell {
    pub const fn neutral(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            owner: None,
            army: 0,
        }
    }
}

/// Fixed-size row-major cell grid. Dimensions never change after generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32, default_terrain: TerrainKind) -> Self {
        let cells = vec![Cell::neutral(default_terrain); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn index_of(&self, at: Coord) -> Option<usize> {
        if at.x < 0 || at.y < 0 || at.x >= self.width as i32 || at.y >= self.height as i32 {
            return None;
        }
        Some((at.y as usize) * (self.width as usize) + (at.x as usize))
    }

    pub fn coord_at_index(&self, index: usize) -> Option<Coord> {
        if index >= self.cells.len() {
            return None;
        }
        Some(Coord {
            x: (index % self.width as usize) as i32,
            y: (index / self.width as usize) as i32,
        })
    }

    pub fn get(&self, at: Coord) -> Option<&Cell> {
        self.index_of(at).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, at: Coord) -> Option<&mut Cell> {
        self.index_of(at).map(move |i| &mut self.cells[i])
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// In-bounds edge neighbors of a cell, in cardinal order.
    pub fn neighbors4_indices(&self, index: usize) -> [Option<usize>; 4] {
        let Some(at) = self.coord_at_index(index) else {
            return [None; 4];
        };
        let mut out = [None; 4];
        for (i, dir) in Coord::CARDINALS.into_iter().enumerate() {
            out[i] = self.index_of(at + dir);
        }
        out
    }

    /// In-bounds indices within Chebyshev distance 1 (the fog radius),
    /// center excluded.
    pub fn neighbors8_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let at = self.coord_at_index(index);
        at.into_iter()
            .flat_map(|c| c.neighbors8())
            .filter_map(|n| self.index_of(n))
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .map(|cell| CellSnapshot {
                    terrain: cell.terrain,
                    owner: cell.owner,
                    army: cell.army,
                })
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: &GridSnapshot) -> Self {
        Self {
            width: snapshot.width,
            height: snapshot.height,
            cells: snapshot
                .cells
                .iter()
                .map(|cell| Cell {
                    terrain: cell.terrain,
                    owner: cell.owner,
                    army: cell.army,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_rejects_out_of_bounds() {
        let grid = Grid::new(4, 3, TerrainKind::Plain);
        assert_eq!(grid.index_of(Coord { x: 0, y: 0 }), Some(0));
        assert_eq!(grid.index_of(Coord { x: 3, y: 2 }), Some(11));
        assert_eq!(grid.index_of(Coord { x: 4, y: 0 }), None);
        assert_eq!(grid.index_of(Coord { x: 0, y: -1 }), None);
    }

    #[test]
    fn coord_at_index_inverts_index_of() {
        let grid = Grid::new(5, 4, TerrainKind::Plain);
        for index in 0..grid.len() {
            let at = grid.coord_at_index(index).unwrap();
            assert_eq!(grid.index_of(at), Some(index));
        }
    }

    #[test]
    fn corner_cell_has_two_edge_neighbors() {
        let grid = Grid::new(3, 3, TerrainKind::Plain);
        let neighbors: Vec<_> = grid.neighbors4_indices(0).into_iter().flatten().collect();
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn center_cell_has_eight_fog_neighbors() {
        let grid = Grid::new(3, 3, TerrainKind::Plain);
        let center = grid.index_of(Coord { x: 1, y: 1 }).unwrap();
        assert_eq!(grid.neighbors8_indices(center).count(), 8);
    }

    #[test]
    fn snapshot_roundtrip_preserves_cells() {
        let mut grid = Grid::new(2, 2, TerrainKind::Plain);
        grid.get_mut(Coord { x: 1, y: 0 }).unwrap().terrain = TerrainKind::Mountain;
        grid.get_mut(Coord { x: 0, y: 1 }).unwrap().army = 12;
        let restored = Grid::from_snapshot(&grid.snapshot());
        assert_eq!(restored, grid);
    }
}
