//! The shared grid store.
//!
//! One `RwLock` guards the whole sparse map. Reads (single cell or whole
//! board) share the lock; writes are exclusive. Every critical section
//! leaves the map consistent, so a poisoned lock is recovered rather than
//! propagated.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mural_types::{Cell, CellValue, Coordinate, Dimensions, OutOfBounds};

use crate::board::Board;

#[derive(Debug, Default)]
struct Cells {
    painted: HashMap<Coordinate, CellValue>,
    /// Bumped on every successful write.
    revision: u64,
}

/// Sparse `rows x cols` board of color tokens, safe to share across threads.
///
/// Dimensions are fixed at construction. Only written cells occupy memory;
/// everything else reads as [`Cell::Unset`].
#[derive(Debug)]
pub struct GridStore {
    dimensions: Dimensions,
    cells: RwLock<Cells>,
}

impl GridStore {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: RwLock::new(Cells::default()),
        }
    }

    /// Convenience for callers that hand the store to several owners.
    #[must_use]
    pub fn shared(dimensions: Dimensions) -> Arc<Self> {
        Arc::new(Self::new(dimensions))
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Validate a signed coordinate supplied by an external caller.
    pub fn locate(&self, row: i64, col: i64) -> Result<Coordinate, OutOfBounds> {
        self.dimensions.locate(row, col)
    }

    /// Insert or overwrite the value at `coord`. Last write wins.
    ///
    /// Out-of-bounds coordinates are rejected before the lock is taken, so a
    /// failed call never touches the map.
    pub fn set_cell(&self, coord: Coordinate, value: CellValue) -> Result<(), OutOfBounds> {
        let coord = self.dimensions.check(coord)?;
        let revision = {
            let mut cells = self.write();
            cells.painted.insert(coord, value);
            cells.revision += 1;
            cells.revision
        };
        tracing::trace!(row = coord.row(), col = coord.col(), revision, "cell set");
        Ok(())
    }

    /// The value at `coord`, or [`Cell::Unset`] if it was never written.
    pub fn get_cell(&self, coord: Coordinate) -> Result<Cell, OutOfBounds> {
        let coord = self.dimensions.check(coord)?;
        Ok(self.read().painted.get(&coord).cloned().into())
    }

    /// Materialize all `rows * cols` cells in row-major order.
    ///
    /// The whole snapshot is built under one read guard, so it reflects a
    /// single point in the write order.
    #[must_use]
    pub fn board(&self) -> Board {
        let cells = self.read();
        let snapshot: Vec<Cell> = self
            .dimensions
            .coordinates()
            .map(|coord| cells.painted.get(&coord).cloned().into())
            .collect();
        Board::from_row_major(self.dimensions, cells.revision, snapshot)
    }

    /// Number of cells that hold a value.
    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.read().painted.len()
    }

    /// Written cells only, sorted row-major.
    #[must_use]
    pub fn painted(&self) -> Vec<(Coordinate, CellValue)> {
        let mut painted: Vec<(Coordinate, CellValue)> = self
            .read()
            .painted
            .iter()
            .map(|(coord, value)| (*coord, value.clone()))
            .collect();
        painted.sort_unstable_by_key(|(coord, _)| *coord);
        painted
    }

    /// Count of successful writes since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    fn read(&self) -> RwLockReadGuard<'_, Cells> {
        self.cells.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cells> {
        self.cells.write().unwrap_or_else(PoisonError::into_inner)
    }
}
