//! Direction geometry: which lines a direction sweeps and how to walk them.
//!
//! For LEFT/RIGHT the lines are rows, for TOP/BOTTOM they are columns. Each
//! line starts on the collapse edge and is walked outward, against the
//! direction's step vector. Both the slider and the oracle go through
//! [`Line::walk`], so the four directions share one code path.

use super::state::{Coord, Direction};

/// One independently swept row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Cell on the collapse edge.
    pub start: Coord,
    /// Step vector `(dx, dy)` toward the collapse edge.
    pub step: (isize, isize),
}

impl Line {
    /// Walk in-bounds cells from the collapse edge to the far edge.
    pub fn walk(self, rows: usize, columns: usize) -> Walk {
        let next = (self.start.row < rows && self.start.column < columns).then_some(self.start);
        Walk {
            next,
            back: (-self.step.0, -self.step.1),
            rows,
            columns,
        }
    }
}

/// Iterator over the coordinates of a [`Line`].
#[derive(Debug, Clone)]
pub struct Walk {
    next: Option<Coord>,
    back: (isize, isize),
    rows: usize,
    columns: usize,
}

impl Iterator for Walk {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        let current = self.next?;
        self.next = current.offset(self.back.0, self.back.1, self.rows, self.columns);
        Some(current)
    }
}

/// Enumerate every line swept by `direction` on a `rows x columns` grid.
pub fn lines(direction: Direction, rows: usize, columns: usize) -> impl Iterator<Item = Line> {
    let step = direction.step();
    let (row_range, column_range) = match direction {
        Direction::Left => (0..rows, 0..1),
        Direction::Top => (0..1, 0..columns),
        Direction::Right => (0..rows, columns.saturating_sub(1)..columns),
        Direction::Bottom => (rows.saturating_sub(1)..rows, 0..columns),
    };
    row_range.flat_map(move |row| {
        column_range
            .clone()
            .map(move |column| Line { start: Coord::new(row, column), step })
    })
}
