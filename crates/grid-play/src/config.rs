use std::io::Read;

use anyhow::{Context, Result, bail};
use merge_grid::engine::{Direction, SpawnPolicy};

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Rotate through the priority list, skipping unplayable directions.
    Cycle,
    /// Uniform choice among playable directions.
    Random,
    /// Always the first playable direction in the priority list.
    Priority,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub play: PlayConfig,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct BoardConfig {
    #[serde(default = "defaults::rows")]
    pub rows: usize,
    #[serde(default = "defaults::columns")]
    pub columns: usize,
    // Flattened so `four_percent` sits directly under [board].
    #[serde(flatten)]
    pub spawn: SpawnPolicy,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct PlayConfig {
    /// Seed for the game's RNG. Entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_moves: Option<u64>,
    #[serde(default = "defaults::policy")]
    pub policy: PolicyKind,
    #[serde(default = "defaults::priority")]
    pub priority: Vec<Direction>,
}

impl Default for Config {
    fn default() -> Self {
        Self { board: BoardConfig::default(), play: PlayConfig::default() }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            columns: defaults::columns(),
            spawn: SpawnPolicy::default(),
        }
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_moves: None,
            policy: defaults::policy(),
            priority: defaults::priority(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(cfg)
    }

    /// Reject settings the engine or the driver can't honour.
    pub fn validate(&self) -> Result<()> {
        if self.board.rows == 0 || self.board.columns == 0 {
            bail!(
                "board must have at least one row and column, got {}x{}",
                self.board.rows,
                self.board.columns
            );
        }
        match self.board.rows.checked_mul(self.board.columns) {
            Some(cells) if cells >= 2 => {}
            Some(_) => bail!("board needs at least two cells to place the opening tiles"),
            None => bail!(
                "board {}x{} has too many cells",
                self.board.rows,
                self.board.columns
            ),
        }
        self.board.spawn.validate()?;
        if self.play.policy != PolicyKind::Random && self.play.priority.is_empty() {
            bail!("play.priority must list at least one direction");
        }
        Ok(())
    }
}

mod defaults {
    use merge_grid::engine::Direction;

    pub fn rows() -> usize { 4 }
    pub fn columns() -> usize { 4 }
    pub fn policy() -> super::PolicyKind { super::PolicyKind::Cycle }
    pub fn priority() -> Vec<Direction> { Direction::ALL.to_vec() }
}
