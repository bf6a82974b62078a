//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Material occupying a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Steam,
    Water,
    Dirt,
    Wall,
}

impl CellState {
    /// Density rank. Lower-ranked material yields to higher-ranked material.
    /// The ranks are spelled out rather than derived from declaration order,
    /// and they double as the persisted snapshot encoding.
    pub fn rank(&self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Steam => 1,
            CellState::Water => 2,
            CellState::Dirt => 3,
            CellState::Wall => 4,
        }
    }

    /// Inverse of `rank`, used when decoding snapshots.
    pub fn from_rank(rank: u8) -> Option<CellState> {
        match rank {
            0 => Some(CellState::Empty),
            1 => Some(CellState::Steam),
            2 => Some(CellState::Water),
            3 => Some(CellState::Dirt),
            4 => Some(CellState::Wall),
            _ => None,
        }
    }

    /// True if a cell holding `self` yields to incoming `mover`.
    pub fn is_empty_for(&self, mover: CellState) -> bool {
        self.rank() < mover.rank()
    }

    /// The steepest angle this material will attempt to move at.
    pub fn max_angle(&self) -> Angle {
        match self {
            CellState::Empty => Angle::None,
            CellState::Steam => Angle::Up,
            CellState::Water => Angle::Horizontal,
            CellState::Dirt => Angle::DiagDown,
            CellState::Wall => Angle::None,
        }
    }

    pub fn all() -> [CellState; 5] {
        [
            CellState::Empty,
            CellState::Steam,
            CellState::Water,
            CellState::Dirt,
            CellState::Wall,
        ]
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Empty => "EMPTY",
            CellState::Steam => "STEAM",
            CellState::Water => "WATER",
            CellState::Dirt => "DIRT",
            CellState::Wall => "WALL",
        };
        write!(f, "{}", name)
    }
}

/// Movement direction attempted by a cell.
///
/// Angles are ordered by rank: a material moves at the lowest-ranked angle
/// it can, so falling straight down is preferred over sliding, which is
/// preferred over spreading sideways or rising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Angle {
    None,
    Down,
    DiagDown,
    Horizontal,
    DiagUp,
    Up,
}

impl Angle {
    pub fn rank(&self) -> u8 {
        match self {
            Angle::None => 0,
            Angle::Down => 1,
            Angle::DiagDown => 2,
            Angle::Horizontal => 3,
            Angle::DiagUp => 4,
            Angle::Up => 5,
        }
    }

    /// Column and row offsets `(dx, dy)`. Rows grow downward, so a positive
    /// `dy` moves toward the floor. The horizontal component is always
    /// non-negative; callers mirror it to probe the other side.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Angle::None => (0, 0),
            Angle::Down => (0, 1),
            Angle::DiagDown => (1, 1),
            Angle::Horizontal => (1, 0),
            Angle::DiagUp => (1, -1),
            Angle::Up => (0, -1),
        }
    }

    pub fn is_bigger_than(&self, other: Angle) -> bool {
        self.rank() > other.rank()
    }

    /// The five movement angles in processing order (`None` excluded).
    pub fn moving() -> [Angle; 5] {
        [
            Angle::Down,
            Angle::DiagDown,
            Angle::Horizontal,
            Angle::DiagUp,
            Angle::Up,
        ]
    }
}

/// Row/column coordinate on the grid. `i` is the row (0 at the top),
/// `j` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub i: i32,
    pub j: i32,
}

impl Coord {
    pub fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    pub fn offset(&self, di: i32, dj: i32) -> Self {
        Self {
            i: self.i + di,
            j: self.j + dj,
        }
    }

    /// Target cell when moving at `angle`.
    pub fn shifted(&self, angle: Angle) -> Self {
        let (dx, dy) = angle.delta();
        Self {
            i: self.i + dy,
            j: self.j + dx,
        }
    }

    /// Target cell when moving at `angle` with the horizontal component
    /// flipped.
    pub fn mirrored(&self, angle: Angle) -> Self {
        let (dx, dy) = angle.delta();
        Self {
            i: self.i + dy,
            j: self.j - dx,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}
