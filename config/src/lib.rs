//! Configuration for Mural, read from `~/.mural/config.toml`.
//!
//! ```toml
//! [board]
//! rows = 10
//! cols = 10
//!
//! [storage]
//! journal = "${HOME}/.mural/board.db"
//! ```
//!
//! Every key is optional. A missing file is not an error.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use mural_types::{Dimensions, DimensionsError};

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MuralConfig {
    pub board: Option<BoardConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite cell journal. `${VAR}` references are expanded.
    pub journal: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read config at {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid board dimensions")]
    Invalid(#[from] DimensionsError),
}

impl MuralConfig {
    /// Load from the default location. `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load a file the user named explicitly. Unlike [`MuralConfig::load`], a
    /// missing file is an error rather than a reason to fall back to defaults.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        Self::load_from(path)?.ok_or_else(|| ConfigError::Missing {
            path: path.to_path_buf(),
        })
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::parse(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Board size, falling back to 10x10 for anything unset.
    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        let board = self.board.as_ref();
        let rows = board.and_then(|b| b.rows).unwrap_or(DEFAULT_ROWS);
        let cols = board.and_then(|b| b.cols).unwrap_or(DEFAULT_COLS);
        Ok(Dimensions::new(rows, cols)?)
    }

    /// Journal location with environment variables expanded.
    ///
    /// `None` means the board runs in memory only.
    #[must_use]
    pub fn journal_path(&self) -> Option<PathBuf> {
        let raw = self.storage.as_ref()?.journal.as_deref()?;
        let expanded = expand_env_vars(raw);
        let trimmed = expanded.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

/// Replace `${VAR}` with the variable's value. Unset variables expand to nothing.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated reference is kept verbatim.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    mural_dir().map(|dir| dir.join("config.toml"))
}

/// `~/.mural`, the home of the config file and default log location.
#[must_use]
pub fn mural_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mural"))
}
