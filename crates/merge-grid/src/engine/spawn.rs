use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::grid::Grid;
use super::state::{Cell, Coord};

/// Weighted value distribution for spawned tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Chance, in percent, that a spawned tile is a 4 rather than a 2.
    #[serde(default = "defaults::four_percent")]
    pub four_percent: u32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy {
            four_percent: defaults::four_percent(),
        }
    }
}

impl SpawnPolicy {
    pub fn new(four_percent: u32) -> Result<Self, EngineError> {
        let policy = SpawnPolicy { four_percent };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.four_percent > 100 {
            return Err(EngineError::InvalidSpawnPolicy(self.four_percent));
        }
        Ok(())
    }

    /// Draw a tile value: 4 with `four_percent` chance, otherwise 2.
    pub fn draw_value<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if rng.gen_range(0..100) < self.four_percent {
            4
        } else {
            2
        }
    }
}

mod defaults {
    pub fn four_percent() -> u32 {
        15
    }
}

/// Place `count` new tiles on distinct, uniformly chosen free cells.
///
/// Fails without touching the grid when fewer than `count` cells are free.
/// Returns the coordinates and values placed, in draw order.
pub(crate) fn spawn<R: Rng + ?Sized>(
    grid: &mut Grid,
    count: usize,
    policy: &SpawnPolicy,
    rng: &mut R,
) -> Result<Vec<(Coord, u32)>, EngineError> {
    let mut free = grid.free_cells();
    if count > free.len() {
        return Err(EngineError::NotEnoughFreeCells {
            requested: count,
            available: free.len(),
        });
    }

    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = rng.gen_range(0..free.len());
        let coord = free.remove(idx);
        let value = policy.draw_value(rng);
        trace!("spawn {value} at {coord}");
        grid.put(Cell::new(coord, value));
        placed.push((coord, value));
    }
    Ok(placed)
}
