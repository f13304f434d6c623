use serde::{Deserialize, Serialize};

/// Cell coordinates on the square grid: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// The four cardinal offsets, in the fixed order used everywhere
    /// movement is resolved.
    pub const CARDINALS: [Coord; 4] = [
        Coord { x: 0, y: -1 }, // Up
        Coord { x: 0, y: 1 },  // Down
        Coord { x: -1, y: 0 }, // Left
        Coord { x: 1, y: 0 },  // Right
    ];

    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance; two cells with distance 1 share an edge or corner.
    #[inline]
    pub fn chebyshev(self, other: Coord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The four edge-adjacent cells, in `CARDINALS` order.
    pub fn neighbors4(self) -> impl Iterator<Item = Coord> {
        Self::CARDINALS.into_iter().map(move |d| self + d)
    }

    /// The eight surrounding cells, row-major order.
    pub fn neighbors8(self) -> impl Iterator<Item = Coord> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(Coord {
                        x: self.x + dx,
                        y: self.y + dy,
                    })
                }
            })
        })
    }
}

impl std::ops::Add for Coord {
    type Output = Coord;

    fn add(self, other: Coord) -> Coord {
        Coord {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Movement direction at the action boundary: four cardinals, in the same
/// fixed order as `Coord::CARDINALS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub const fn offset(self) -> Coord {
        match self {
            Direction::Up => Coord { x: 0, y: -1 },
            Direction::Down => Coord { x: 0, y: 1 },
            Direction::Left => Coord { x: -1, y: 0 },
            Direction::Right => Coord { x: 1, y: 0 },
        }
    }
}
