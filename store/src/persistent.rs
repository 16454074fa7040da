//! Write-through persistence: the grid store as a cache in front of a journal.
//!
//! Reads never touch SQLite. Writes are serialized by the journal mutex and
//! applied to the journal first, then to memory, so the journal's final
//! value for a cell is always the value readers observe. The grid owns its
//! store outright; there is no handle through which a write could skip the
//! journal.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use mural_core::{Board, GridStore};
use mural_types::{Cell, CellValue, Coordinate, Dimensions, OutOfBounds};

use crate::journal::CellJournal;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    #[error("failed to journal cell {coord}")]
    Journal {
        coord: Coordinate,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Outcome of replaying a journal into a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayReport {
    pub restored: usize,
    pub skipped: usize,
}

/// A [`GridStore`] whose writes are also recorded in a [`CellJournal`].
pub struct PersistentGrid {
    store: GridStore,
    journal: Mutex<CellJournal>,
    replay: ReplayReport,
}

impl PersistentGrid {
    /// Bind the journal to `dims` and replay it into a fresh store.
    ///
    /// Entries that fall outside `dims` are skipped; the map never receives an
    /// invalid coordinate.
    pub fn open(dims: Dimensions, journal: CellJournal) -> anyhow::Result<Self> {
        let store = GridStore::new(dims);
        let bound = journal.bind_dimensions(dims)?;
        if bound != dims {
            tracing::warn!(
                journal = %bound,
                board = %dims,
                "Cell journal was created for a different board size; out-of-range cells will be skipped"
            );
        }

        let mut replay = ReplayReport::default();
        for entry in journal.entries()? {
            match store.set_cell(entry.coord, entry.value) {
                Ok(()) => replay.restored += 1,
                Err(err) => {
                    tracing::warn!("Skipping journaled cell: {err}");
                    replay.skipped += 1;
                }
            }
        }
        tracing::info!(
            restored = replay.restored,
            skipped = replay.skipped,
            "Replayed cell journal"
        );

        Ok(Self {
            store,
            journal: Mutex::new(journal),
            replay,
        })
    }

    /// Journal then apply a write. A failed journal write leaves memory untouched.
    pub fn set_cell(&self, coord: Coordinate, value: CellValue) -> Result<(), PersistError> {
        let coord = self.store.dimensions().check(coord)?;
        let journal = self
            .journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        journal
            .record(coord, &value)
            .map_err(|err| PersistError::Journal {
                coord,
                source: err.into(),
            })?;
        self.store.set_cell(coord, value)?;
        Ok(())
    }

    pub fn get_cell(&self, coord: Coordinate) -> Result<Cell, OutOfBounds> {
        self.store.get_cell(coord)
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.store.board()
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.store.dimensions()
    }

    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.store.painted_count()
    }

    /// Written cells only, sorted row-major.
    #[must_use]
    pub fn painted(&self) -> Vec<(Coordinate, CellValue)> {
        self.store.painted()
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    #[must_use]
    pub fn replay_report(&self) -> ReplayReport {
        self.replay
    }
}
