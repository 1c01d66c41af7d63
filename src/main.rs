use anyhow::{Context, Result};
use arcade_snake::config_file::load_config;
use arcade_snake::game::{GameConfig, GameEngine, Rules};
use arcade_snake::logger::init_logging;
use arcade_snake::modes::{ArcadeMode, ClassicMode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Snake arcade game for the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "arcade")]
    mode: Mode,

    /// YAML file overriding the default game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for a reproducible food and obstacle sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Ring the terminal bell on sound cues
    #[arg(long)]
    sound: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Menus, two levels and bonus food
    Arcade,
    /// Border wall, the first collision ends the game
    Classic,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    config.rules = match cli.mode {
        Mode::Arcade => Rules::Arcade,
        Mode::Classic => Rules::Classic,
    };
    config.sound |= cli.sound;

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    }
    .context("Failed to create game engine")?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Arcade => ArcadeMode::new(engine)?.run().await?,
        Mode::Classic => ClassicMode::new(engine)?.run().await?,
    }

    Ok(())
}
