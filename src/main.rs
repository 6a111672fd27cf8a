mod config;
mod error;
mod food;
mod game;
mod grid;
mod input;
mod leaderboard;
mod menu;
mod obstacles;
mod session;
mod snake;
mod term;

use std::fs::File;

use anyhow::Context;
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use config::{Args, GameConfig};

pub type TermInt = u16;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout belongs to the game screen, so logs go to a file
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {:?}", args.log_file))?;
    WriteLogger::init(level, Config::default(), log_file).context("initializing logger")?;

    let mut term = term::TermManager::new().context("reading terminal size")?;
    let (width, height) = term.get_terminal_size();
    let config = GameConfig::from_args(&args, GameConfig::board_bounds(width, height));
    config.validate().context("terminal too small")?;

    info!("Starting termsnake on a {}x{} terminal", width, height);

    term.setup().context("setting up terminal")?;
    let result = game::SnakeGame::new(config, term).and_then(|mut game| {
        game.run()?;
        info!(
            "Final leaderboard {:?} after {} sessions",
            game.leaderboard().scores(),
            game.sessions_played() + 1
        );
        Ok(())
    });

    // The terminal was restored when the game dropped it.
    if let Err(e) = &result {
        error!("Game aborted: {}", e);
    }
    result.context("game aborted")
}
