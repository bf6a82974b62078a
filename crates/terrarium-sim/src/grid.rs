//! 2D cell grid with a live buffer and a write buffer.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use terrarium_core::{CellState, Census, Coord, Error, Result, WorldConfig};

/// A bounded 2D grid of material cells.
///
/// Reads outside the grid see `Wall`, which gives the world an impermeable
/// border without storing one. Writes outside the grid are rejected.
///
/// The grid keeps a second buffer for the synchronous update strategy:
/// `set_next` stages a value that becomes visible after `commit`, while
/// `set` writes both buffers so immediate changes survive the next commit.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<CellState>,
    next: Vec<CellState>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = (width * height) as usize;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Empty; size],
            next: vec![CellState::Empty; size],
        })
    }

    /// Create a grid from world configuration, scattering material by the
    /// configured densities.
    pub fn from_config(config: &WorldConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        let mut grid = Self::new(config.width, config.height)?;

        for i in 0..config.height {
            for j in 0..config.width {
                let roll = rng.gen::<f32>();
                let state = if roll < config.wall_density {
                    CellState::Wall
                } else if roll < config.wall_density + config.dirt_density {
                    CellState::Dirt
                } else if roll < config.wall_density + config.dirt_density + config.water_density {
                    CellState::Water
                } else {
                    continue;
                };
                grid.set(i, j, state)?;
            }
        }

        Ok(grid)
    }

    fn index(&self, i: i32, j: i32) -> Option<usize> {
        if i < 0 || i >= self.height || j < 0 || j >= self.width {
            None
        } else {
            Some((i * self.width + j) as usize)
        }
    }

    /// Get the state at (i, j). Cells outside the grid read as `Wall`.
    pub fn get(&self, i: i32, j: i32) -> CellState {
        match self.index(i, j) {
            Some(idx) => self.cells[idx],
            None => CellState::Wall,
        }
    }

    /// Set the state at (i, j) in both buffers, so the change is visible
    /// immediately and survives the next `commit`.
    pub fn set(&mut self, i: i32, j: i32, state: CellState) -> Result<()> {
        let idx = self.index(i, j).ok_or(Error::OutOfBounds {
            i,
            j,
            width: self.width,
            height: self.height,
        })?;
        self.cells[idx] = state;
        self.next[idx] = state;
        Ok(())
    }

    /// Stage the state at (i, j) in the write buffer. The change becomes
    /// visible after `commit`.
    pub fn set_next(&mut self, i: i32, j: i32, state: CellState) -> Result<()> {
        let idx = self.index(i, j).ok_or(Error::OutOfBounds {
            i,
            j,
            width: self.width,
            height: self.height,
        })?;
        self.next[idx] = state;
        Ok(())
    }

    /// Copy the write buffer into the live buffer.
    pub fn commit(&mut self) {
        self.cells.copy_from_slice(&self.next);
    }

    /// Attempt to push the contents of `from` into `to`. The push succeeds
    /// when the destination holds strictly less dense material, in which
    /// case the two cells swap.
    pub(crate) fn try_push(&mut self, from: Coord, to: Coord) -> bool {
        let from_idx = match self.index(from.i, from.j) {
            Some(idx) => idx,
            None => return false,
        };
        let mover = self.cells[from_idx];
        if !self.get(to.i, to.j).is_empty_for(mover) {
            return false;
        }
        let to_idx = match self.index(to.i, to.j) {
            Some(idx) => idx,
            None => return false,
        };
        self.cells.swap(from_idx, to_idx);
        self.next[from_idx] = self.cells[from_idx];
        self.next[to_idx] = self.cells[to_idx];
        true
    }

    /// The in-bounds neighbors of `p`, in row-major order.
    pub fn neighbors(&self, p: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(8);
        for i in (p.i - 1).max(0)..(p.i + 2).min(self.height) {
            for j in (p.j - 1).max(0)..(p.j + 2).min(self.width) {
                if i == p.i && j == p.j {
                    continue;
                }
                result.push(Coord::new(i, j));
            }
        }
        result
    }

    /// Fill every in-bounds cell within Euclidean `radius` of (i, j) with
    /// `state`, skipping cells outside the grid. Returns the number of
    /// cells written.
    pub fn deposit(&mut self, i: i32, j: i32, radius: i32, state: CellState) -> usize {
        let mut written = 0;
        for di in -radius..=radius {
            for dj in -radius..=radius {
                if di * di + dj * dj > radius * radius {
                    continue;
                }
                if self.set(i + di, j + dj, state).is_ok() {
                    written += 1;
                }
            }
        }
        written
    }

    /// Count cells per material.
    pub fn census(&self) -> Census {
        let mut census = Census::new();
        for &cell in &self.cells {
            census.record(cell);
        }
        census
    }

    /// Iterator over all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |i| (0..width).map(move |j| Coord::new(i, j)))
    }
}
