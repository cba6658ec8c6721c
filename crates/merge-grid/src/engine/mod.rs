//! Engine module: grid storage, direction geometry, the line slider, tile
//! spawning and slidability detection. Public API stays small.
//!
//! - `Board` owns the grid and drives start/slide/restart.
//! - `Direction`/`DirectionSet` share one bit layout (LEFT=1, TOP=2, RIGHT=4, BOTTOM=8).
//! - Slides report an immutable event list; `Snapshot` copies the grid for renderers.

mod board;
mod error;
mod events;
pub mod geometry;
mod grid;
mod oracle;
mod slider;
mod spawn;
pub mod state;

pub use board::Board;
pub use error::{EngineError, ErrorKind};
pub use events::{CellSnapshot, SlideReport, Snapshot, TileEvent};
pub use spawn::SpawnPolicy;
pub use state::{Cell, Coord, Direction, DirectionSet};
