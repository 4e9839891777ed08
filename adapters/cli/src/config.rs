//! Layered game configuration: defaults, an optional TOML file, then flags.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use cat_chase_core::GameConfig;
use clap::Parser;

/// Command-line arguments accepted by the `cat-chase` binary.
#[derive(Debug, Parser)]
#[command(name = "cat-chase", version, about = "Chase the mice before they reach a house")]
pub(crate) struct CliArgs {
    /// TOML file providing game settings.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Number of grid columns.
    #[arg(long)]
    pub(crate) columns: Option<u32>,
    /// Number of grid rows.
    #[arg(long)]
    pub(crate) rows: Option<u32>,
    /// Number of mice placed per game.
    #[arg(long)]
    pub(crate) mice: Option<u32>,
    /// Number of houses placed per game.
    #[arg(long)]
    pub(crate) houses: Option<u32>,
    /// Seed for placement; omitted means a fresh seed per run.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Moves to play before handing over control: U, D, L, R, and X to reset.
    #[arg(long, value_name = "MOVES")]
    pub(crate) script: Option<String>,
    /// Run without opening a window and print a summary instead.
    #[arg(long)]
    pub(crate) headless: bool,
}

/// Resolves the effective configuration for `args`.
pub(crate) fn resolve(args: &CliArgs) -> Result<GameConfig> {
    let base = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    let config = apply_overrides(base, args);
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn parse(contents: &str) -> Result<GameConfig> {
    Ok(toml::from_str(contents)?)
}

fn apply_overrides(mut config: GameConfig, args: &CliArgs) -> GameConfig {
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(mice) = args.mice {
        config.mice = mice;
    }
    if let Some(houses) = args.houses {
        config.houses = houses;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config
}
