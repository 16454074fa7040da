//! Fully materialized board snapshots.

use std::vec;

use serde::Serialize;

use mural_types::{Cell, Coordinate, Dimensions};

/// Every cell of the board at one instant, in row-major order.
///
/// Element `row * cols + col` is the cell at `(row, col)`. Consumers index
/// the sequence directly, so this order is part of the contract.
///
/// Iterating by value consumes the snapshot; take a fresh one from the store
/// to read the board again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    #[serde(flatten)]
    dimensions: Dimensions,
    revision: u64,
    cells: Vec<Cell>,
}

impl Board {
    /// `cells` must hold exactly `dimensions.cell_count()` entries in row-major order.
    pub(crate) fn from_row_major(dimensions: Dimensions, revision: u64, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), dimensions.cell_count());
        Self {
            dimensions,
            revision,
            cells,
        }
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Store revision the snapshot was taken at.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Always `rows * cols`.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<&Cell> {
        self.dimensions
            .index_of(coord)
            .and_then(|index| self.cells.get(index))
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One slice of `cols` cells per row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.dimensions.cols())
    }

    #[must_use]
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_unset()).count()
    }

    /// The board as plain tokens, unset cells as the empty sentinel.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        self.cells.into_iter().map(Cell::into_token).collect()
    }
}

impl IntoIterator for Board {
    type Item = Cell;
    type IntoIter = vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}
