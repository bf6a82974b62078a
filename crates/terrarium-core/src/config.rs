//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Width of the grid in cells
    pub width: i32,
    /// Height of the grid in cells
    pub height: i32,
    /// Fraction of cells seeded with dirt (0.0 to 1.0)
    pub dirt_density: f32,
    /// Fraction of cells seeded with water (0.0 to 1.0)
    pub water_density: f32,
    /// Fraction of cells seeded with wall (0.0 to 1.0)
    pub wall_density: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            dirt_density: 0.2,
            water_density: 0.05,
            wall_density: 0.0,
        }
    }
}

/// Update strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    BlockSwap,
    SingleCell,
    Synchronous,
}

impl EngineKind {
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::BlockSwap => "block_swap",
            EngineKind::SingleCell => "single_cell",
            EngineKind::Synchronous => "synchronous",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "block_swap" => Some(EngineKind::BlockSwap),
            "single_cell" => Some(EngineKind::SingleCell),
            "synchronous" => Some(EngineKind::Synchronous),
            _ => None,
        }
    }
}

impl Default for EngineKind {
    fn default() -> Self {
        EngineKind::SingleCell
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of ticks to run
    pub num_ticks: u64,
    /// Random seed for world generation
    pub seed: u64,
    /// Ticks between census log lines (0 disables periodic logging)
    pub log_interval: u64,
    /// Update strategy
    pub engine: EngineKind,
    /// World parameters
    pub world: WorldConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_ticks: 1_000,
            seed: 0,
            log_interval: 100,
            engine: EngineKind::default(),
            world: WorldConfig::default(),
        }
    }
}
