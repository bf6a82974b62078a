//! Per-material census of grid contents.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::CellState;

/// Cell counts per material for one grid state.
///
/// The conservation checks compare whole censuses before and after a run,
/// so equality compares every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub empty: u64,
    pub steam: u64,
    pub water: u64,
    pub dirt: u64,
    pub wall: u64,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: CellState) {
        match state {
            CellState::Empty => self.empty += 1,
            CellState::Steam => self.steam += 1,
            CellState::Water => self.water += 1,
            CellState::Dirt => self.dirt += 1,
            CellState::Wall => self.wall += 1,
        }
    }

    pub fn count(&self, state: CellState) -> u64 {
        match state {
            CellState::Empty => self.empty,
            CellState::Steam => self.steam,
            CellState::Water => self.water,
            CellState::Dirt => self.dirt,
            CellState::Wall => self.wall,
        }
    }

    /// Total cells recorded.
    pub fn total(&self) -> u64 {
        self.empty + self.steam + self.water + self.dirt + self.wall
    }

    /// Movable material only; empty space and walls excluded.
    pub fn material_total(&self) -> u64 {
        self.steam + self.water + self.dirt
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, state) in CellState::all().iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", state, self.count(*state))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_counts() {
        let mut census = Census::new();
        census.record(CellState::Dirt);
        census.record(CellState::Dirt);
        census.record(CellState::Water);
        census.record(CellState::Empty);

        assert_eq!(census.count(CellState::Dirt), 2);
        assert_eq!(census.count(CellState::Water), 1);
        assert_eq!(census.count(CellState::Steam), 0);
        assert_eq!(census.total(), 4);
        assert_eq!(census.material_total(), 3);
    }

    #[test]
    fn test_census_display() {
        let mut census = Census::new();
        census.record(CellState::Water);
        census.record(CellState::Wall);

        assert_eq!(census.to_string(), "EMPTY:0 STEAM:0 WATER:1 DIRT:0 WALL:1");
    }
}
