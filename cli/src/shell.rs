//! The line-oriented shell that drives a board.
//!
//! Each input line is one command. Command output goes to the writer; a
//! failing command prints `error: ...` and the shell keeps reading.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use mural_core::{Board, GridStore};
use mural_store::{PersistError, PersistentGrid};
use mural_types::{Cell, CellValue, Coordinate, Dimensions, EmptyCellValue, OutOfBounds};
use mural_utils::atomic_write;

use crate::commands::{Command, command_help};

/// Where writes go: memory only, or memory plus the SQLite journal.
pub enum Backend {
    Memory(Arc<GridStore>),
    Journaled(PersistentGrid),
}

impl Backend {
    fn set_cell(&self, coord: Coordinate, value: CellValue) -> Result<(), ShellError> {
        match self {
            Backend::Memory(store) => store.set_cell(coord, value)?,
            Backend::Journaled(grid) => grid.set_cell(coord, value)?,
        }
        Ok(())
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        match self {
            Backend::Memory(store) => store.dimensions(),
            Backend::Journaled(grid) => grid.dimensions(),
        }
    }

    pub fn get_cell(&self, coord: Coordinate) -> Result<Cell, OutOfBounds> {
        match self {
            Backend::Memory(store) => store.get_cell(coord),
            Backend::Journaled(grid) => grid.get_cell(coord),
        }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        match self {
            Backend::Memory(store) => store.board(),
            Backend::Journaled(grid) => grid.board(),
        }
    }

    #[must_use]
    pub fn painted_count(&self) -> usize {
        match self {
            Backend::Memory(store) => store.painted_count(),
            Backend::Journaled(grid) => grid.painted_count(),
        }
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        match self {
            Backend::Memory(store) => store.revision(),
            Backend::Journaled(grid) => grid.revision(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("not a coordinate: {0}")]
    NotANumber(String),
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    #[error(transparent)]
    EmptyColor(#[from] EmptyCellValue),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("failed to export board to {}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode board")]
    Encode(#[from] serde_json::Error),
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

pub struct Shell {
    backend: Backend,
}

impl Shell {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Read access to the board. Writes only go through [`Shell::execute`].
    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Run one command line.
    pub fn execute(&self, line: &str) -> Result<Outcome, ShellError> {
        let output = match Command::parse(line) {
            Command::Set { row, col, color } => {
                let (Some(row), Some(col), Some(color)) = (row, col, color) else {
                    return Err(ShellError::Usage("set <row> <col> <color>"));
                };
                let coord = self.locate(row, col)?;
                let value = CellValue::new(color)?;
                self.backend.set_cell(coord, value)?;
                tracing::debug!(row = coord.row(), col = coord.col(), color, "Painted cell");
                "ok".to_string()
            }
            Command::Get { row, col } => {
                let (Some(row), Some(col)) = (row, col) else {
                    return Err(ShellError::Usage("get <row> <col>"));
                };
                let coord = self.locate(row, col)?;
                match self.backend.get_cell(coord)? {
                    Cell::Unset => "(unset)".to_string(),
                    Cell::Painted(value) => value.into_inner(),
                }
            }
            Command::Board => render_board(&self.backend.board()),
            Command::Tokens => serde_json::to_string(&self.backend.board().into_tokens())?,
            Command::Export(path) => {
                let Some(path) = path else {
                    return Err(ShellError::Usage("export <path>"));
                };
                self.export(PathBuf::from(path))?
            }
            Command::Stats => format!(
                "{} board, {} painted, revision {}",
                self.backend.dimensions(),
                self.backend.painted_count(),
                self.backend.revision()
            ),
            Command::Help => command_help(),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Unknown(cmd) => return Err(ShellError::Unknown(cmd.to_string())),
            Command::Empty => return Ok(Outcome::Continue(None)),
        };
        Ok(Outcome::Continue(Some(output)))
    }

    /// Read commands until end of input or `quit`.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Outcome::Continue(Some(text))) => writeln!(output, "{text}")?,
                Ok(Outcome::Continue(None)) => {}
                Ok(Outcome::Quit) => break,
                Err(err) => {
                    tracing::debug!(line = %line, "Command failed: {err}");
                    writeln!(output, "error: {err}")?;
                }
            }
            output.flush()?;
        }
        Ok(())
    }

    fn locate(&self, row: &str, col: &str) -> Result<Coordinate, ShellError> {
        let row = parse_index(row)?;
        let col = parse_index(col)?;
        Ok(self.backend.dimensions().locate(row, col)?)
    }

    fn export(&self, path: PathBuf) -> Result<String, ShellError> {
        let board = self.backend.board();
        let painted = board.painted_count();
        let json = serde_json::to_vec_pretty(&board)?;
        if let Err(source) = atomic_write(&path, &json) {
            return Err(ShellError::Export { path, source });
        }
        tracing::info!(path = %path.display(), painted, "Exported board");
        Ok(format!("exported {painted} painted cells to {}", path.display()))
    }
}

fn parse_index(raw: &str) -> Result<i64, ShellError> {
    raw.parse()
        .map_err(|_| ShellError::NotANumber(raw.to_string()))
}

/// One line per row, cells separated by spaces, `.` for unset.
#[must_use]
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for (index, row) in board.rows().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| if cell.is_unset() { "." } else { cell.as_str() })
            .collect();
        out.push_str(&cells.join(" "));
    }
    out
}
