//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use mural_config::{ConfigError, MuralConfig};

#[derive(Debug, Parser)]
#[command(name = "mural")]
#[command(about = "Line-oriented shell for a shared grid canvas")]
pub struct Args {
    /// Read configuration from this file instead of ~/.mural/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Ignore any configured journal; the board is lost on exit
    #[arg(long)]
    pub in_memory: bool,
}

impl Args {
    /// Configuration for this run.
    ///
    /// A file named with `--config` must exist. Without the flag, a missing
    /// `~/.mural/config.toml` just means defaults.
    pub fn load_config(&self) -> Result<MuralConfig, ConfigError> {
        match &self.config {
            Some(path) => MuralConfig::load_required(path),
            None => Ok(MuralConfig::load()?.unwrap_or_default()),
        }
    }
}
