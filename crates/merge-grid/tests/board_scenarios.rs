use std::collections::HashSet;

use merge_grid::engine::{Board, Direction, EngineError, ErrorKind, Snapshot, TileEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Play up to `max_moves` random playable slides, checking per-slide invariants.
fn play_checked(seed: u64, rows: usize, columns: usize, max_moves: usize) -> Vec<Snapshot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(rows, columns).expect("board");
    board.start(&mut rng).expect("start");
    let mut frames = vec![board.snapshot()];

    for _ in 0..max_moves {
        if board.is_game_over() {
            break;
        }
        let playable: Vec<Direction> = board.slidable().iter().collect();
        let dir = playable[rng.gen_range(0..playable.len())];

        let occupied_before = board.occupied();
        let sum_before = board.tile_sum();
        let report = board
            .slide(dir, &mut rng)
            .expect("slide")
            .expect("playable direction");

        let spawned: Vec<(_, u32)> = report.spawned().collect();
        assert_eq!(spawned.len(), 1);
        assert!(spawned[0].1 == 2 || spawned[0].1 == 4);
        assert_eq!(board.occupied(), occupied_before - report.merges + 1);
        assert_eq!(board.tile_sum(), sum_before + u64::from(spawned[0].1));

        let mut sources = HashSet::new();
        let mut merge_events = 0;
        for event in &report.events {
            if let TileEvent::Merged { sources: (a, b), value, .. } = *event {
                merge_events += 1;
                assert!(value >= 4 && value.is_power_of_two());
                assert!(sources.insert(a), "tile {a} merged twice");
                assert!(sources.insert(b), "tile {b} merged twice");
            }
        }
        assert_eq!(merge_events, report.merges);
        frames.push(board.snapshot());
    }
    frames
}

#[test]
fn start_places_two_small_tiles() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new(4, 4).unwrap();
        board.start(&mut rng).unwrap();
        let values: Vec<u32> = board.snapshot().values().into_iter().filter(|&v| v != 0).collect();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|&v| v == 2 || v == 4));
    }
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..20 {
        play_checked(seed, 4, 4, 500);
    }
    play_checked(77, 3, 5, 300);
    play_checked(78, 6, 2, 300);
}

#[test]
fn same_seed_replays_identically() {
    assert_eq!(play_checked(2024, 4, 4, 200), play_checked(2024, 4, 4, 200));
}

#[test]
fn scenario_pair_then_pack() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut board = Board::from_values(1, 4, &[2, 2, 4, 0]).unwrap();
    let report = board.slide(Direction::Left, &mut rng).unwrap().expect("playable");
    assert_eq!(report.merges, 1);
    let values = board.snapshot().values();
    assert_eq!(&values[..2], &[4, 4]);
    // the spawn lands in one of the two freed cells
    assert_eq!(values[2..].iter().filter(|&&v| v != 0).count(), 1);
}

#[test]
fn scenario_earliest_pair_wins() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut board = Board::from_values(1, 4, &[2, 0, 2, 2]).unwrap();
    let report = board.slide(Direction::Left, &mut rng).unwrap().expect("playable");
    assert_eq!(report.merges, 1);
    let values = board.snapshot().values();
    assert_eq!(&values[..2], &[4, 2]);
    assert!(report.events.contains(&TileEvent::Merged {
        sources: ((0, 0).into(), (0, 2).into()),
        into: (0, 0).into(),
        value: 4,
    }));
}

#[test]
fn scenario_full_row_is_stuck() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut board = Board::from_values(1, 4, &[2, 4, 8, 16]).unwrap();
    assert!(!board.is_slidable(Direction::Left));
    assert!(!board.is_slidable(Direction::Right));
    let before = board.snapshot();
    assert_eq!(board.slide(Direction::Left, &mut rng), Ok(None));
    assert_eq!(board.snapshot(), before);
    assert!(board.is_game_over());
}

#[test]
fn largest_tiles_stay_apart() {
    let top = 1u32 << 31;
    let mut rng = StdRng::seed_from_u64(3);
    let mut board = Board::from_values(1, 3, &[top, top, 0]).unwrap();
    assert!(!board.is_slidable(Direction::Left));
    assert!(board.is_slidable(Direction::Right));
    let before = board.snapshot();
    assert_eq!(board.slide(Direction::Left, &mut rng), Ok(None));
    assert_eq!(board.snapshot(), before);

    let mut board = Board::from_values(1, 3, &[top >> 1, top >> 1, 0]).unwrap();
    let report = board.slide(Direction::Left, &mut rng).unwrap().expect("playable");
    assert_eq!(report.merges, 1);
    assert_eq!(board.highest_tile(), top);
}

#[test]
fn scenario_double_start() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut board = Board::new(4, 4).unwrap();
    board.start(&mut rng).unwrap();
    let err = board.start(&mut rng).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn unknown_direction_bits_are_invalid_argument() {
    let err = Direction::try_from(6u8).unwrap_err();
    assert_eq!(err, EngineError::UnknownDirection(6));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn unplayable_slide_keeps_provenance() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut board = Board::from_values(2, 2, &[0, 2, 0, 4]).unwrap();
    board.slide(Direction::Left, &mut rng).unwrap().expect("playable");
    let after_move = board.snapshot();
    for d in Direction::ALL {
        if !board.is_slidable(d) {
            assert_eq!(board.slide(d, &mut rng), Ok(None));
            assert_eq!(board.snapshot(), after_move);
        }
    }
}

#[test]
fn snapshot_serializes_for_renderers() {
    let board = Board::from_values(1, 2, &[2, 0]).unwrap();
    let json = serde_json::to_value(board.snapshot()).unwrap();
    assert_eq!(json["rows"], 1);
    assert_eq!(json["cells"][0]["value"], 2);
    assert!(json["cells"][1].is_null());
}
