mod config;
mod policy;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use merge_grid::engine::Board;
use rand::SeedableRng;
use rand::rngs::StdRng;

use config::Config;
use policy::Chooser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a seeded merge-grid game headlessly")]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Override the number of rows
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Override the number of columns
    #[arg(long, value_name = "N")]
    columns: Option<usize>,

    /// Only print the final board
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)?
        }
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.play.seed = Some(seed);
    }
    if let Some(rows) = args.rows {
        config.board.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.board.columns = columns;
    }
    config.validate()?;

    let seed = config.play.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::with_policy(config.board.rows, config.board.columns, config.board.spawn)
        .context("failed to build board")?;
    board.start(&mut rng).context("failed to start game")?;
    info!(
        "Playing {}x{} board, seed {seed}, policy {:?}",
        board.rows(),
        board.columns(),
        config.play.policy
    );

    let mut chooser = Chooser::new(config.play.policy.clone(), config.play.priority.clone());
    let mut moves: u64 = 0;
    if !args.quiet {
        println!("{board}");
    }
    while config.play.max_moves.map_or(true, |max| moves < max) {
        let Some(direction) = chooser.choose(board.slidable(), &mut rng) else {
            break;
        };
        let Some(report) = board.slide(direction, &mut rng)? else {
            break;
        };
        moves += 1;
        debug!("move {moves}: {direction}, {} merge(s)", report.merges);
        for event in &report.events {
            debug!("  {event:?}");
        }
        if !args.quiet {
            println!("{direction}\n{board}");
        }
    }

    if args.quiet {
        println!("{board}");
    }
    info!(
        "Finished after {moves} move(s): highest tile {}, tile sum {}, game over: {}",
        board.highest_tile(),
        board.tile_sum(),
        board.is_game_over()
    );
    Ok(())
}
