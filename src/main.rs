use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hungry_snakes::audio::SoundBoard;
use hungry_snakes::game::GameConfig;
use hungry_snakes::modes::{ArcadeMode, GuessMode};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hungry_snakes")]
#[command(version, about = "Snake arcade game and word-guessing game")]
struct Cli {
    /// Which game to play
    #[arg(long, default_value = "snake")]
    mode: Mode,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Lives at the start of a run (overrides the config file)
    #[arg(long)]
    lives: Option<u32>,

    /// Seed for apple placement and word choice
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with grid size, lives and levels
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// Write logs to this file; nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Snake arcade game in the terminal
    Snake,
    /// Console word-guessing game
    Guess,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    match cli.mode {
        Mode::Snake => {
            let config = build_config(&cli)?;
            info!(
                "Starting snake on a {}x{} grid with {} lives and {} levels",
                config.grid_width,
                config.grid_height,
                config.initial_lives,
                config.levels.len()
            );
            let sounds = SoundBoard::open(cli.mute);
            let mut arcade = ArcadeMode::new(config, cli.seed, sounds);
            arcade.run().await?;
        }
        Mode::Guess => {
            info!("Starting word guess");
            let mut guess = GuessMode::new(cli.seed)?;
            guess.run()?;
        }
    }

    Ok(())
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(lives) = cli.lives {
        config.initial_lives = lives;
    }

    config.validate()?;
    Ok(config)
}
