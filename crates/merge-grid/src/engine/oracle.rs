use super::geometry::{Line, lines};
use super::grid::Grid;
use super::state::{Direction, DirectionSet, can_merge};

/// Compute the set of directions in which at least one line would change.
///
/// Read-only: the grid is never mutated.
pub(crate) fn slidable_directions(grid: &Grid) -> DirectionSet {
    Direction::ALL
        .into_iter()
        .filter(|&d| is_direction_slidable(grid, d))
        .collect()
}

pub(crate) fn is_direction_slidable(grid: &Grid, direction: Direction) -> bool {
    lines(direction, grid.rows(), grid.columns()).any(|line| is_line_slidable(grid, line))
}

/// A line is slidable once a tile follows an empty cell, or when two tiles
/// meet with equal values before any empty cell was seen.
///
/// After the first gap every later tile reports true immediately, so the
/// equal-value test only ever fires on the gap-free prefix.
fn is_line_slidable(grid: &Grid, line: Line) -> bool {
    let mut last_value: Option<u32> = None;
    let mut empty_seen = false;
    for coord in line.walk(grid.rows(), grid.columns()) {
        match grid.get(coord) {
            Some(cell) => {
                let mergeable = last_value == Some(cell.value()) && can_merge(cell.value());
                if empty_seen || mergeable {
                    return true;
                }
                last_value = Some(cell.value());
            }
            None => empty_seen = true,
        }
    }
    false
}
