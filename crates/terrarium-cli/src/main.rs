//! Headless runner for the terrarium simulation.

mod telemetry;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use terrarium_core::{CellState, EngineKind, SimConfig, WorldConfig};
use terrarium_sim::{Grid, Snapshot, Terrarium};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value = "80")]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value = "24")]
    height: i32,

    /// Number of ticks to run
    #[arg(long, default_value = "200")]
    ticks: u64,

    /// Update strategy: block_swap, single_cell or synchronous
    #[arg(long, default_value = "single_cell")]
    engine: String,

    /// World generation seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Fraction of cells seeded with dirt
    #[arg(long, default_value = "0.2")]
    dirt_density: f32,

    /// Fraction of cells seeded with water
    #[arg(long, default_value = "0.05")]
    water_density: f32,

    /// Fraction of cells seeded with wall
    #[arg(long, default_value = "0.0")]
    wall_density: f32,

    /// Ticks between census log lines (0 disables them)
    #[arg(long, default_value = "50")]
    log_interval: u64,

    /// Write a JSON snapshot of the final world to this path
    #[arg(long)]
    save: Option<PathBuf>,

    /// Start from a JSON snapshot instead of generating a world
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    telemetry::init_tracing()?;

    let args = Args::parse();
    let engine = EngineKind::from_name(&args.engine).ok_or_else(|| {
        anyhow!(
            "unknown engine '{}' (expected block_swap, single_cell or synchronous)",
            args.engine
        )
    })?;

    let config = SimConfig {
        num_ticks: args.ticks,
        seed: args.seed,
        log_interval: args.log_interval,
        engine,
        world: WorldConfig {
            width: args.width,
            height: args.height,
            dirt_density: args.dirt_density,
            water_density: args.water_density,
            wall_density: args.wall_density,
        },
    };

    info!(
        engine = engine.name(),
        ticks = args.ticks,
        "Starting terrarium"
    );

    let mut terrarium = match &args.load {
        Some(path) => {
            let snapshot = Snapshot::load_json(path)?;
            let grid = Grid::from_snapshot(&snapshot)?;
            info!(path = %path.display(), "Loaded snapshot");
            Terrarium::from_grid(grid, config)
        }
        None => {
            let mut terrarium = Terrarium::new(config)?;
            pour(&mut terrarium);
            terrarium
        }
    };

    let summary = terrarium.run();

    print!("{}", render_frame(terrarium.grid()));
    println!("{}", serde_json::to_string(&summary)?);

    if let Some(path) = &args.save {
        terrarium.grid().snapshot().save_json(path)?;
    }

    Ok(())
}

/// Drop a mound of dirt low in the world and a splash of water above it.
fn pour(terrarium: &mut Terrarium) {
    let width = terrarium.grid().width;
    let height = terrarium.grid().height;
    let radius = (width.min(height) / 6).max(1);

    let dirt = terrarium.deposit(height * 3 / 4, width / 2, radius, CellState::Dirt);
    let water = terrarium.deposit(height / 4, width / 2, radius, CellState::Water);
    debug!(dirt, water, radius, "Poured starting material");
}

fn render_frame(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width as usize + 1) * grid.height as usize);
    for i in 0..grid.height {
        for j in 0..grid.width {
            out.push(state_char(grid.get(i, j)));
        }
        out.push('\n');
    }
    out
}

fn state_char(state: CellState) -> char {
    match state {
        CellState::Empty => ' ',
        CellState::Steam => '.',
        CellState::Water => '~',
        CellState::Dirt => '#',
        CellState::Wall => '@',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["terrarium"]).unwrap();
        assert_eq!(args.width, 80);
        assert_eq!(args.height, 24);
        assert_eq!(args.ticks, 200);
        assert_eq!(args.engine, "single_cell");
        assert_eq!(args.seed, 0);
    }

    #[test]
    fn test_args_select_engine() {
        let args =
            Args::try_parse_from(["terrarium", "--engine", "block_swap", "--ticks", "10"]).unwrap();
        assert_eq!(
            EngineKind::from_name(&args.engine),
            Some(EngineKind::BlockSwap)
        );
        assert_eq!(args.ticks, 10);
    }

    #[test]
    fn test_render_frame() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(1, 0, CellState::Dirt).unwrap();
        grid.set(1, 1, CellState::Water).unwrap();
        grid.set(1, 2, CellState::Wall).unwrap();

        assert_eq!(render_frame(&grid), "   \n#~@\n");
    }

    #[test]
    fn test_state_chars_are_distinct() {
        let chars: std::collections::HashSet<char> =
            CellState::all().iter().map(|&s| state_char(s)).collect();
        assert_eq!(chars.len(), CellState::all().len());
    }
}
