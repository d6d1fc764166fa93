mod canvas;
mod clock;
mod collision;
mod config;
mod fruit;
mod game;
mod grid;
mod input;
mod point;
mod snake;
mod term;
mod world;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::config::Cli;
use crate::game::SnakeGame;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    // stdout belongs to the game, so the log goes to a file
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(LevelFilter::from(cli.log_level), Config::default(), log_file)
        .context("failed to initialize logger")?;

    info!("starting, seed {:?}", config.seed);

    let mut game = SnakeGame::new(config);
    let result = run(&mut game);

    // The terminal is restored even when the loop failed
    game.shutdown();

    if let Err(err) = &result {
        error!("game stopped: {:#}", err);
    }
    info!("exiting");

    result
}

fn run(game: &mut SnakeGame) -> Result<()> {
    game.initialize()?;

    if game.show_intro()? {
        game.play()?;
    }

    Ok(())
}
