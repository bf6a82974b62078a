//! Snapshot and restore functionality.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use terrarium_core::{CellState, Error, Result};
use tracing::info;

use crate::grid::Grid;

/// Portable image of a world at a single tick.
///
/// Cell states are stored as ranks in row-major order, so a snapshot
/// written under one engine can be reloaded under any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub states: Vec<u8>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Serialize the snapshot to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize a snapshot from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), "Saved snapshot");
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Grid {
    /// Capture the committed state of every cell.
    pub fn snapshot(&self) -> Snapshot {
        let states = self.coords().map(|p| self.get(p.i, p.j).rank()).collect();
        Snapshot {
            width: self.width,
            height: self.height,
            states,
        }
    }

    /// Rebuild a grid from a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut grid = Grid::new(snapshot.width, snapshot.height)?;
        let expected = (snapshot.width * snapshot.height) as usize;
        if snapshot.states.len() != expected {
            return Err(Error::Serialization(format!(
                "expected {} states for a {}x{} grid, got {}",
                expected,
                snapshot.width,
                snapshot.height,
                snapshot.states.len()
            )));
        }

        for (idx, &rank) in snapshot.states.iter().enumerate() {
            let state = CellState::from_rank(rank)
                .ok_or_else(|| Error::Serialization(format!("unknown cell state rank {}", rank)))?;
            let i = idx as i32 / snapshot.width;
            let j = idx as i32 % snapshot.width;
            grid.set(i, j, state)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_shape() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 0, CellState::Dirt).unwrap();
        grid.set(0, 2, CellState::Water).unwrap();
        grid.set(1, 1, CellState::Dirt).unwrap();
        grid.set(1, 2, CellState::Wall).unwrap();

        let json = grid.snapshot().to_json().unwrap();
        assert_eq!(json, r#"{"width":3,"height":2,"states":[3,0,2,0,3,4]}"#);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_cells() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(0, 1, CellState::Steam).unwrap();
        grid.set(1, 2, CellState::Water).unwrap();
        grid.set(2, 0, CellState::Dirt).unwrap();
        grid.set(2, 3, CellState::Wall).unwrap();

        let restored = Grid::from_snapshot(&grid.snapshot()).unwrap();

        assert_eq!(restored.width, grid.width);
        assert_eq!(restored.height, grid.height);
        for p in grid.coords() {
            assert_eq!(restored.get(p.i, p.j), grid.get(p.i, p.j));
        }
    }

    #[test]
    fn test_snapshot_bytes_round_trip() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(1, 0, CellState::Dirt).unwrap();

        let bytes = grid.snapshot().to_bytes().unwrap();
        let decoded = Snapshot::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, grid.snapshot());
    }

    #[test]
    fn test_rejects_wrong_state_count() {
        let snapshot = Snapshot {
            width: 2,
            height: 2,
            states: vec![0, 0, 0],
        };

        let err = Grid::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_rejects_unknown_rank() {
        let snapshot = Snapshot {
            width: 2,
            height: 1,
            states: vec![0, 9],
        };

        let err = Grid::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
