//! Simulation driver for running a terrarium.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use terrarium_core::{CellState, Census, Result, SimConfig};
use tracing::{debug, info, instrument};

use crate::engine::{build_engine, Engine};
use crate::grid::Grid;

pub struct Terrarium {
    grid: Grid,
    engine: Box<dyn Engine>,
    config: SimConfig,
    tick: u64,
    moves: u64,
}

impl Terrarium {
    /// Generate a world from the config and attach the configured engine.
    pub fn new(config: SimConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::from_config(&config.world, &mut rng)?;
        let engine = build_engine(config.engine);

        info!(
            engine = engine.name(),
            width = config.world.width,
            height = config.world.height,
            seed = config.seed,
            "Created terrarium"
        );

        Ok(Self {
            grid,
            engine,
            config,
            tick: 0,
            moves: 0,
        })
    }

    /// Run an existing grid instead of generating one.
    pub fn from_grid(grid: Grid, config: SimConfig) -> Self {
        let engine = build_engine(config.engine);
        Self {
            grid,
            engine,
            config,
            tick: 0,
            moves: 0,
        }
    }

    /// Advance the world by one tick. Returns the number of cell moves.
    pub fn tick(&mut self) -> usize {
        let moves = self.engine.step(&mut self.grid);
        self.tick += 1;
        self.moves += moves as u64;
        moves
    }

    /// Run the simulation for the configured number of ticks
    #[instrument(skip(self), fields(num_ticks = self.config.num_ticks))]
    pub fn run(&mut self) -> RunSummary {
        info!("Starting simulation for {} ticks", self.config.num_ticks);

        for _ in 0..self.config.num_ticks {
            let moves = self.tick();

            if self.config.log_interval > 0 && self.tick % self.config.log_interval == 0 {
                let census = self.grid.census();
                info!(
                    tick = self.tick,
                    moves,
                    material = census.material_total(),
                    census = %census,
                    "Tick complete"
                );
            }
        }

        let census = self.grid.census();
        let summary = RunSummary {
            engine: self.engine.name().to_string(),
            ticks: self.tick,
            moves: self.moves,
            material: census.material_total(),
            census,
        };

        info!(
            engine = %summary.engine,
            ticks = summary.ticks,
            moves = summary.moves,
            "Simulation complete"
        );

        summary
    }

    /// Stamp a disc of `state` onto the world, clipped to the borders.
    /// Returns the number of cells written.
    pub fn deposit(&mut self, i: i32, j: i32, radius: i32, state: CellState) -> usize {
        let written = self.grid.deposit(i, j, radius, state);
        debug!(i, j, radius, state = %state, written, "Deposited material");
        written
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub engine: String,
    pub ticks: u64,
    pub moves: u64,
    /// Movable cells at the end of the run; walls and empty space excluded.
    pub material: u64,
    pub census: Census,
}
