//! Immutable per-slide output for rendering collaborators.
//!
//! A slide yields a [`SlideReport`] listing what happened to each tile, and the
//! board can be captured at any time as a [`Snapshot`]. Neither aliases the
//! board's own cells.

use serde::Serialize;

use super::grid::Grid;
use super::state::{Cell, Coord, Direction};

/// What happened to one tile during a slide or start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TileEvent {
    Moved { from: Coord, to: Coord, value: u32 },
    Merged { sources: (Coord, Coord), into: Coord, value: u32 },
    Spawned { at: Coord, value: u32 },
}

/// Outcome of one successful slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideReport {
    pub direction: Direction,
    pub merges: usize,
    pub events: Vec<TileEvent>,
}

impl SlideReport {
    pub fn spawned(&self) -> impl Iterator<Item = (Coord, u32)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            TileEvent::Spawned { at, value } => Some((at, value)),
            _ => None,
        })
    }
}

/// Read-only copy of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub value: u32,
    pub row: usize,
    pub column: usize,
    pub previous: Option<Coord>,
    pub merged_from: Option<(Coord, Coord)>,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        CellSnapshot {
            value: cell.value(),
            row: cell.row(),
            column: cell.column(),
            previous: cell.previous(),
            merged_from: cell.merged_from(),
        }
    }
}

/// Row-major copy of the whole grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Option<CellSnapshot>>,
}

impl Snapshot {
    pub(crate) fn capture(grid: &Grid) -> Self {
        Snapshot {
            rows: grid.rows(),
            columns: grid.columns(),
            cells: grid.iter().map(|(_, c)| c.map(CellSnapshot::from)).collect(),
        }
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&CellSnapshot> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells[row * self.columns + column].as_ref()
    }

    /// Tile values row-major, 0 for empty.
    pub fn values(&self) -> Vec<u32> {
        self.cells.iter().map(|c| c.map_or(0, |c| c.value)).collect()
    }
}

/// Move and merge events derived from cell provenance, row-major.
pub(crate) fn sweep_events(grid: &Grid) -> Vec<TileEvent> {
    grid.iter()
        .filter_map(|(coord, cell)| {
            let cell = cell?;
            if let Some(sources) = cell.merged_from() {
                return Some(TileEvent::Merged {
                    sources,
                    into: coord,
                    value: cell.value(),
                });
            }
            cell.previous().map(|from| TileEvent::Moved {
                from,
                to: coord,
                value: cell.value(),
            })
        })
        .collect()
}

pub(crate) fn spawn_events(placed: &[(Coord, u32)]) -> Vec<TileEvent> {
    placed
        .iter()
        .map(|&(at, value)| TileEvent::Spawned { at, value })
        .collect()
}
