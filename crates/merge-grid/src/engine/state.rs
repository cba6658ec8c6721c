use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// A grid position, zero-based from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Coord { row, column }
    }

    /// Step by `(d_column, d_row)`, returning `None` when leaving a `rows x columns` grid.
    #[inline]
    pub(crate) fn offset(
        self,
        d_column: isize,
        d_row: isize,
        rows: usize,
        columns: usize,
    ) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row)?;
        let column = self.column.checked_add_signed(d_column)?;
        (row < rows && column < columns).then_some(Coord { row, column })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, column): (usize, usize)) -> Self {
        Coord { row, column }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A direction to slide tiles toward.
///
/// The discriminants are the fixed bit assignment shared with [`DirectionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Left = 1,
    #[serde(alias = "up")]
    Top = 2,
    Right = 4,
    #[serde(alias = "down")]
    Bottom = 8,
}

impl Direction {
    /// All four directions in canonical bit order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Step vector `(dx, dy)` pointing at the collapse edge.
    #[inline]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Direction::Left),
            2 => Ok(Direction::Top),
            4 => Ok(Direction::Right),
            8 => Ok(Direction::Bottom),
            other => Err(EngineError::UnknownDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> Self {
        d.bit()
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "top" | "up" | "t" | "u" => Ok(Direction::Top),
            "right" | "r" => Ok(Direction::Right),
            "bottom" | "down" | "b" | "d" => Ok(Direction::Bottom),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of directions, stored as the OR of their bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);
    pub const ALL: DirectionSet = DirectionSet(0b1111);

    /// Build a set from raw bits, rejecting anything outside the four direction bits.
    pub fn from_bits(bits: u8) -> Result<Self, EngineError> {
        if bits & !Self::ALL.0 != 0 {
            return Err(EngineError::UnknownDirection(bits));
        }
        Ok(DirectionSet(bits))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in canonical order (left, top, right, bottom).
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl TryFrom<u8> for DirectionSet {
    type Error = EngineError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        DirectionSet::from_bits(bits)
    }
}

impl From<Direction> for DirectionSet {
    fn from(d: Direction) -> Self {
        DirectionSet(d.bit())
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

/// A placed tile.
///
/// Position and provenance are engine-owned; collaborators only read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    value: u32,
    previous: Option<Coord>,
    merged_from: Option<(Coord, Coord)>,
}

impl Cell {
    pub(crate) fn new(coord: Coord, value: u32) -> Self {
        Cell {
            coord,
            value,
            previous: None,
            merged_from: None,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.coord.row
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.coord.column
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Position before the last slide, if the tile moved during it.
    #[inline]
    pub fn previous(&self) -> Option<Coord> {
        self.previous
    }

    /// Pre-slide positions of the two tiles this one was merged from.
    #[inline]
    pub fn merged_from(&self) -> Option<(Coord, Coord)> {
        self.merged_from
    }

    /// Position at the start of the current slide pass.
    #[inline]
    pub(crate) fn origin(&self) -> Coord {
        self.previous.unwrap_or(self.coord)
    }

    pub(crate) fn clear_provenance(&mut self) {
        self.previous = None;
        self.merged_from = None;
    }

    pub(crate) fn move_to(&mut self, coord: Coord) {
        if self.previous.is_none() {
            self.previous = Some(self.coord);
        }
        self.coord = coord;
    }

    /// Double this tile's value, recording both operands' pre-slide positions.
    ///
    /// Callers check [`can_merge`] first; the largest tile never absorbs.
    pub(crate) fn absorb(&mut self, other: &Cell) {
        debug_assert_eq!(self.value, other.value);
        debug_assert!(can_merge(self.value));
        self.merged_from = Some((self.origin(), other.origin()));
        self.previous = None;
        self.value = self.value.saturating_mul(2);
    }
}

/// True for powers of two >= 2.
#[inline]
pub fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// True when two tiles of `value` can merge without leaving `u32`.
#[inline]
pub fn can_merge(value: u32) -> bool {
    value <= u32::MAX / 2
}
