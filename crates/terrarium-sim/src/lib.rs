//! Falling-sand simulation engine.
//!
//! This crate implements the 2D cell grid and the update strategies that
//! move material through it.

pub mod grid;
pub mod engine;
pub mod block;
pub mod single_cell;
pub mod synchronous;
pub mod snapshot;
pub mod simulation;

pub use engine::{build_engine, Engine};
pub use grid::Grid;
pub use simulation::{RunSummary, Terrarium};
pub use snapshot::Snapshot;
