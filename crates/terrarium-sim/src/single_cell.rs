//! Asynchronous single-cell update strategy.

use std::collections::{HashSet, VecDeque};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terrarium_core::{Angle, Coord};
use tracing::trace;

use crate::engine::Engine;
use crate::grid::Grid;

/// Priority-ordered single-cell automaton.
///
/// Cells are updated one at a time, steepest angles first. After every
/// successful move the neighbors of the vacated cell are queued again, so
/// a cell that was blocked when first visited can still move later in the
/// same tick once its neighborhood has changed. Each cell can be moved
/// into at most once per tick, which keeps a single grain from crossing
/// the whole grid in one step.
pub struct SingleCellEngine {
    mirror_rng: Option<ChaCha8Rng>,
}

impl SingleCellEngine {
    pub fn new() -> Self {
        Self { mirror_rng: None }
    }

    /// Randomise which side is tried first for mirrored moves. Off by
    /// default; the fixed right-then-left order keeps ticks deterministic.
    pub fn with_mirror_shuffle(seed: u64) -> Self {
        Self {
            mirror_rng: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Try to move the contents of `p` at `angle`. Returns the destination
    /// on success. A blocked move is not an error.
    fn move_cell(&mut self, grid: &mut Grid, p: Coord, angle: Angle) -> Option<Coord> {
        if angle.is_bigger_than(grid.get(p.i, p.j).max_angle()) {
            return None;
        }

        let mirror_first = match self.mirror_rng.as_mut() {
            Some(rng) => rng.gen_bool(0.5),
            None => false,
        };
        let (first, second) = if mirror_first {
            (p.mirrored(angle), p.shifted(angle))
        } else {
            (p.shifted(angle), p.mirrored(angle))
        };

        if grid.try_push(p, first) {
            return Some(first);
        }
        if grid.try_push(p, second) {
            return Some(second);
        }
        None
    }
}

impl Default for SingleCellEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SingleCellEngine {
    fn name(&self) -> &'static str {
        "single_cell"
    }

    fn step(&mut self, grid: &mut Grid) -> usize {
        // Destinations filled this tick; they are final until the next one
        let mut moved_into: HashSet<Coord> = HashSet::new();
        let mut moves = 0;

        for angle in Angle::moving() {
            let mut to_check: VecDeque<Coord> = grid
                .coords()
                .filter(|p| !angle.is_bigger_than(grid.get(p.i, p.j).max_angle()))
                .collect();

            while let Some(p) = to_check.pop_front() {
                if moved_into.contains(&p) {
                    continue;
                }
                if let Some(dest) = self.move_cell(grid, p, angle) {
                    moved_into.insert(dest);
                    moves += 1;
                    for n in grid.neighbors(p) {
                        to_check.push_back(n);
                    }
                }
            }
        }

        trace!(engine = self.name(), moves, "single-cell pass");
        moves
    }
}
