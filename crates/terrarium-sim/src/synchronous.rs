//! Synchronous whole-grid update strategy.

use terrarium_core::{CellState, Result};
use tracing::trace;

use crate::engine::Engine;
use crate::grid::Grid;

/// Double-buffered dirt automaton.
///
/// Every cell computes its next state from the committed tick, then the
/// whole grid flips at once. Source and destination cells decide
/// independently, so two empty cells flanking a toppling grain can both
/// claim it and material is not strictly conserved. Water and steam have
/// no rules here and stay where they are.
pub struct SynchronousEngine;

impl SynchronousEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SynchronousEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn next_state(grid: &Grid, i: i32, j: i32) -> CellState {
    let here = grid.get(i, j);

    // Dirt falls down
    if here == CellState::Empty && grid.get(i - 1, j) == CellState::Dirt {
        return CellState::Dirt;
    }
    if here == CellState::Dirt && grid.get(i + 1, j) == CellState::Empty {
        return CellState::Empty;
    }

    // Dirt subsides
    if here == CellState::Empty
        && grid.get(i, j + 1) == CellState::Dirt
        && grid.get(i - 1, j + 1) == CellState::Dirt
    {
        return CellState::Dirt;
    }
    if here == CellState::Empty
        && grid.get(i, j - 1) == CellState::Dirt
        && grid.get(i - 1, j - 1) == CellState::Dirt
    {
        return CellState::Dirt;
    }
    if here == CellState::Dirt
        && grid.get(i + 1, j) == CellState::Dirt
        && grid.get(i + 1, j + 1) == CellState::Empty
    {
        return CellState::Empty;
    }
    if here == CellState::Dirt
        && grid.get(i + 1, j) == CellState::Dirt
        && grid.get(i + 1, j - 1) == CellState::Empty
    {
        return CellState::Empty;
    }

    here
}

fn pass(grid: &mut Grid) -> Result<usize> {
    let mut changed = 0;
    for i in 0..grid.height {
        for j in 0..grid.width {
            let next = next_state(grid, i, j);
            if next != grid.get(i, j) {
                changed += 1;
            }
            grid.set_next(i, j, next)?;
        }
    }
    grid.commit();
    Ok(changed)
}

impl Engine for SynchronousEngine {
    fn name(&self) -> &'static str {
        "synchronous"
    }

    fn step(&mut self, grid: &mut Grid) -> usize {
        // The loop stays in bounds, so the write path cannot fail
        let changed = pass(grid).unwrap_or(0);
        trace!(engine = self.name(), changed, "synchronous pass");
        changed
    }
}
