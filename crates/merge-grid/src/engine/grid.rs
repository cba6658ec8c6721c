use super::error::EngineError;
use super::state::{Cell, Coord};

/// Row-major storage of optional cells with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    pub(crate) fn new(rows: usize, columns: usize) -> Result<Self, EngineError> {
        if rows == 0 || columns == 0 {
            return Err(EngineError::InvalidDimensions { rows, columns });
        }
        let len = rows
            .checked_mul(columns)
            .ok_or(EngineError::InvalidDimensions { rows, columns })?;
        Ok(Grid {
            rows,
            columns,
            cells: vec![None; len],
        })
    }

    #[inline]
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        debug_assert!(coord.row < self.rows && coord.column < self.columns);
        coord.row * self.columns + coord.column
    }

    #[inline]
    fn coord_at(&self, idx: usize) -> Coord {
        Coord::new(idx / self.columns, idx % self.columns)
    }

    #[inline]
    pub(crate) fn get(&self, coord: Coord) -> Option<&Cell> {
        let idx = self.index(coord);
        self.cells[idx].as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        let idx = self.index(coord);
        self.cells[idx].as_mut()
    }

    #[inline]
    pub(crate) fn take(&mut self, coord: Coord) -> Option<Cell> {
        let idx = self.index(coord);
        self.cells[idx].take()
    }

    /// Place `cell` at its own coordinate.
    #[inline]
    pub(crate) fn put(&mut self, cell: Cell) {
        let idx = self.index(cell.coord());
        debug_assert!(self.cells[idx].is_none(), "cell {} already occupied", cell.coord());
        self.cells[idx] = Some(cell);
    }

    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// All `(coord, cell-or-empty)` pairs in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Coord, Option<&Cell>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (self.coord_at(idx), cell.as_ref()))
    }

    pub(crate) fn free_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter_map(|(coord, cell)| cell.is_none().then_some(coord))
            .collect()
    }

    pub(crate) fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(EngineError::InvalidDimensions { rows: 0, columns: 4 })
        );
        assert!(Grid::new(4, 0).is_err());
    }

    #[test]
    fn put_take_roundtrip() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.put(Cell::new(Coord::new(1, 2), 4));
        assert_eq!(grid.occupied(), 1);
        assert_eq!(grid.get(Coord::new(1, 2)).map(Cell::value), Some(4));
        assert_eq!(grid.free_cells().len(), 5);
        let cell = grid.take(Coord::new(1, 2)).expect("cell");
        assert_eq!(cell.value(), 4);
        assert!(grid.get(Coord::new(1, 2)).is_none());
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::new(2, 2).unwrap();
        let coords: Vec<_> = grid.iter().map(|(c, _)| (c.row, c.column)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
