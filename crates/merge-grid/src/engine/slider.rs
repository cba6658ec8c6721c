use super::geometry::Line;
use super::grid::Grid;
use super::state::{Coord, can_merge};

/// Collapse one line toward its collapse edge, moving and merging in place.
///
/// Walks from the collapse edge outward, tracking the earliest unfilled empty
/// slot and the last tile that may still absorb an equal neighbour. A tile
/// takes part in at most one merge per call. Returns the number of merges.
pub(crate) fn slide_line(grid: &mut Grid, line: Line) -> usize {
    let coords: Vec<Coord> = line.walk(grid.rows(), grid.columns()).collect();
    let mut empty_slot: Option<usize> = None;
    let mut candidate: Option<usize> = None;
    let mut merges = 0;

    for (i, &coord) in coords.iter().enumerate() {
        let Some(mut cell) = grid.take(coord) else {
            empty_slot.get_or_insert(i);
            continue;
        };
        cell.clear_provenance();

        let target = match candidate {
            Some(ci) => grid
                .get_mut(coords[ci])
                .filter(|target| target.value() == cell.value() && can_merge(cell.value())),
            None => None,
        };
        if let Some(target) = target {
            target.absorb(&cell);
            merges += 1;
            candidate = None;
            // `cell` is consumed; its coordinate stays vacated.
            empty_slot.get_or_insert(i);
            continue;
        }

        match empty_slot {
            Some(slot) => {
                cell.move_to(coords[slot]);
                candidate = Some(slot);
                empty_slot = Some(slot + 1);
            }
            None => candidate = Some(i),
        }
        grid.put(cell);
    }
    merges
}
