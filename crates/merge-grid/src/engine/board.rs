use std::fmt;

use log::debug;
use rand::Rng;

use super::error::EngineError;
use super::events::{SlideReport, Snapshot, TileEvent, spawn_events, sweep_events};
use super::geometry::lines;
use super::grid::Grid;
use super::oracle::slidable_directions;
use super::slider::slide_line;
use super::spawn::{SpawnPolicy, spawn};
use super::state::{Cell, Coord, Direction, DirectionSet, is_tile_value};

/// Tiles placed by `start`.
const START_TILES: usize = 2;

/// A fixed-size merge-puzzle board.
///
/// The board owns every [`Cell`]. Randomness is supplied per call, so the same
/// seed always replays the same game:
/// ```
/// use merge_grid::engine::{Board, Direction};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut board = Board::new(4, 4).unwrap();
/// board.start(&mut rng).unwrap();
/// assert_eq!(board.occupied(), 2);
/// for d in Direction::ALL {
///     if board.is_slidable(d) {
///         let report = board.slide(d, &mut rng).unwrap().expect("playable");
///         assert_eq!(report.spawned().count(), 1);
///         break;
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    policy: SpawnPolicy,
    started: bool,
    slidable: DirectionSet,
}

impl Board {
    /// Empty, not-started board using the default spawn policy.
    pub fn new(rows: usize, columns: usize) -> Result<Self, EngineError> {
        Self::with_policy(rows, columns, SpawnPolicy::default())
    }

    pub fn with_policy(
        rows: usize,
        columns: usize,
        policy: SpawnPolicy,
    ) -> Result<Self, EngineError> {
        policy.validate()?;
        Ok(Board {
            grid: Grid::new(rows, columns)?,
            policy,
            started: false,
            slidable: DirectionSet::EMPTY,
        })
    }

    /// Build a started board from row-major `values` (0 = empty).
    ///
    /// ```
    /// use merge_grid::engine::{Board, Direction};
    /// let board = Board::from_values(1, 4, &[2, 4, 8, 16]).unwrap();
    /// assert!(!board.is_slidable(Direction::Left));
    /// ```
    pub fn from_values(rows: usize, columns: usize, values: &[u32]) -> Result<Self, EngineError> {
        let mut board = Self::new(rows, columns)?;
        let expected = rows * columns;
        if values.len() != expected {
            return Err(EngineError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        for (idx, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            if !is_tile_value(value) {
                return Err(EngineError::InvalidTileValue(value));
            }
            board
                .grid
                .put(Cell::new(Coord::new(idx / columns, idx % columns), value));
        }
        board.started = true;
        board.refresh_slidable();
        Ok(board)
    }

    /// Spawn the two opening tiles and compute the slidable directions.
    ///
    /// Returns the spawn events. Fails with `AlreadyStarted` on a started board.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<TileEvent>, EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        let placed = spawn(&mut self.grid, START_TILES, &self.policy, rng)?;
        self.started = true;
        self.refresh_slidable();
        debug!(
            "started {}x{} board, slidable {:#06b}",
            self.rows(),
            self.columns(),
            self.slidable.bits()
        );
        Ok(spawn_events(&placed))
    }

    /// Slide every line toward `direction`, then spawn one tile.
    ///
    /// Returns `Ok(None)` without touching the board when the direction is not
    /// playable (including on a board that has not been started).
    pub fn slide<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Option<SlideReport>, EngineError> {
        if !self.is_slidable(direction) {
            debug!("ignoring slide {direction}: not playable");
            return Ok(None);
        }

        let (rows, columns) = (self.rows(), self.columns());
        let merges: usize = lines(direction, rows, columns)
            .map(|line| slide_line(&mut self.grid, line))
            .sum();
        let mut events = sweep_events(&self.grid);

        // A playable slide leaves at least one free cell, so this cannot fail.
        let placed = spawn(&mut self.grid, 1, &self.policy, rng)?;
        events.extend(spawn_events(&placed));
        self.refresh_slidable();

        debug!(
            "slid {direction}: {merges} merge(s), {} event(s), slidable {:#06b}",
            events.len(),
            self.slidable.bits()
        );
        Ok(Some(SlideReport {
            direction,
            merges,
            events,
        }))
    }

    /// [`Board::slide`] for callers holding raw direction bits.
    ///
    /// Fails with `UnknownDirection` unless `bits` is exactly one direction bit.
    pub fn slide_bits<R: Rng + ?Sized>(
        &mut self,
        bits: u8,
        rng: &mut R,
    ) -> Result<Option<SlideReport>, EngineError> {
        let direction = Direction::try_from(bits)?;
        self.slide(direction, rng)
    }

    /// O(1) check against the cached slidable set.
    #[inline]
    pub fn is_slidable(&self, direction: Direction) -> bool {
        self.slidable.contains(direction)
    }

    /// Like [`Board::is_slidable`], for callers holding raw direction bits.
    pub fn is_slidable_bits(&self, bits: u8) -> Result<bool, EngineError> {
        Direction::try_from(bits).map(|d| self.is_slidable(d))
    }

    #[inline]
    pub fn slidable(&self) -> DirectionSet {
        self.slidable
    }

    /// Started and stuck in every direction.
    pub fn is_game_over(&self) -> bool {
        self.started && self.slidable.is_empty()
    }

    /// Clear all cells and return to the not-started state.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.started = false;
        self.slidable = DirectionSet::EMPTY;
        debug!("board reset");
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<TileEvent>, EngineError> {
        self.reset();
        self.start(rng)
    }

    fn refresh_slidable(&mut self) {
        self.slidable = slidable_directions(&self.grid);
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Cell at `coord`, or `None` when empty or out of bounds.
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        if coord.row >= self.rows() || coord.column >= self.columns() {
            return None;
        }
        self.grid.get(coord)
    }

    /// Every `(coord, cell-or-empty)` pair in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Option<&Cell>)> + '_ {
        self.grid.iter()
    }

    pub fn free_cells(&self) -> Vec<Coord> {
        self.grid.free_cells()
    }

    pub fn occupied(&self) -> usize {
        self.grid.occupied()
    }

    /// Highest tile value, 0 on an empty board.
    pub fn highest_tile(&self) -> u32 {
        self.cells()
            .filter_map(|(_, c)| c.map(Cell::value))
            .max()
            .unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells()
            .filter_map(|(_, c)| c.map(|c| u64::from(c.value())))
            .sum()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.grid)
    }
}

fn format_val(value: u32) -> String {
    match value {
        0 => String::from("       "),
        v => format!("{v:^7}"),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "-".repeat(self.columns() * 8);
        for row in 0..self.rows() {
            if row > 0 {
                writeln!(f, "{divider}")?;
            }
            let line: Vec<String> = (0..self.columns())
                .map(|column| {
                    let value = self.grid.get(Coord::new(row, column)).map_or(0, Cell::value);
                    format_val(value)
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
