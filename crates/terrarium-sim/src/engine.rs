//! Update strategy abstraction.

use terrarium_core::EngineKind;

use crate::block::BlockSwapEngine;
use crate::grid::Grid;
use crate::single_cell::SingleCellEngine;
use crate::synchronous::SynchronousEngine;

/// A grid update strategy.
///
/// Implementations mutate the grid in place. `step` returns the number of
/// cell movements applied, so a return of zero means the grid is at rest
/// under this strategy. Blocked movements are not errors; they simply do
/// not count.
pub trait Engine {
    fn name(&self) -> &'static str;

    fn step(&mut self, grid: &mut Grid) -> usize;
}

/// Construct the engine for a configured strategy.
pub fn build_engine(kind: EngineKind) -> Box<dyn Engine> {
    match kind {
        EngineKind::BlockSwap => Box::new(BlockSwapEngine::new()),
        EngineKind::SingleCell => Box::new(SingleCellEngine::new()),
        EngineKind::Synchronous => Box::new(SynchronousEngine::new()),
    }
}
