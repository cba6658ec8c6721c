//! merge-grid: simulation engine for the sliding-tile merge puzzle (the "2048" family).
//!
//! This crate provides:
//! - A rectangular `Board` of power-of-two tiles with `start`, `slide` and `restart`
//! - Cached per-direction slidability (`is_slidable`) computed without mutation
//! - Immutable per-slide event lists and grid snapshots for renderers
//!
//! Randomness is always passed in, never global. Quick start:
//! ```
//! use merge_grid::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut board = Board::new(4, 4).unwrap();
//! board.start(&mut rng).unwrap();
//!
//! let mut moves = 0;
//! while !board.is_game_over() && moves < 8 {
//!     let dir = board.slidable().iter().next().unwrap();
//!     let report = board.slide(dir, &mut rng).unwrap().unwrap();
//!     assert_eq!(report.direction, dir);
//!     moves += 1;
//! }
//! println!("{board}");
//! ```
pub mod engine;
