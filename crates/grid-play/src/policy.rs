use merge_grid::engine::{Direction, DirectionSet};
use rand::Rng;

use crate::config::PolicyKind;

/// Picks the next direction from the board's playable set.
pub struct Chooser {
    kind: PolicyKind,
    priority: Vec<Direction>,
    cursor: usize,
}

impl Chooser {
    pub fn new(kind: PolicyKind, priority: Vec<Direction>) -> Self {
        Self {
            kind,
            priority,
            cursor: 0,
        }
    }

    /// `None` only when nothing is playable.
    pub fn choose<R: Rng + ?Sized>(&mut self, playable: DirectionSet, rng: &mut R) -> Option<Direction> {
        if playable.is_empty() {
            return None;
        }
        match self.kind {
            PolicyKind::Random => {
                let options: Vec<Direction> = playable.iter().collect();
                Some(options[rng.gen_range(0..options.len())])
            }
            PolicyKind::Priority => self
                .priority
                .iter()
                .copied()
                .find(|d| playable.contains(*d))
                .or_else(|| playable.iter().next()),
            PolicyKind::Cycle => {
                let n = self.priority.len();
                for offset in 0..n {
                    let idx = (self.cursor + offset) % n;
                    let d = self.priority[idx];
                    if playable.contains(d) {
                        self.cursor = (idx + 1) % n;
                        return Some(d);
                    }
                }
                playable.iter().next()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn priority_takes_first_playable() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut c = Chooser::new(PolicyKind::Priority, vec![Direction::Bottom, Direction::Left]);
        let set: DirectionSet = [Direction::Left, Direction::Top].into_iter().collect();
        assert_eq!(c.choose(set, &mut rng), Some(Direction::Left));
        // nothing from the list is playable: fall back to canonical order
        let set: DirectionSet = [Direction::Right, Direction::Top].into_iter().collect();
        assert_eq!(c.choose(set, &mut rng), Some(Direction::Top));
    }

    #[test]
    fn cycle_rotates() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut c = Chooser::new(PolicyKind::Cycle, Direction::ALL.to_vec());
        let picks: Vec<_> = (0..5)
            .map(|_| c.choose(DirectionSet::ALL, &mut rng).unwrap())
            .collect();
        assert_eq!(
            picks,
            vec![
                Direction::Left,
                Direction::Top,
                Direction::Right,
                Direction::Bottom,
                Direction::Left
            ]
        );
    }

    #[test]
    fn random_stays_within_playable() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = Chooser::new(PolicyKind::Random, Vec::new());
        let set: DirectionSet = [Direction::Right, Direction::Bottom].into_iter().collect();
        for _ in 0..50 {
            let d = c.choose(set, &mut rng).unwrap();
            assert!(set.contains(d));
        }
        assert_eq!(c.choose(DirectionSet::EMPTY, &mut rng), None);
    }
}
