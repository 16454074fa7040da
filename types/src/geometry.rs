//! Board geometry: coordinates, fixed dimensions, and the bounds check.
//!
//! `Dimensions` is the only authority on whether a `Coordinate` is valid.
//! A coordinate is a plain value and can name any cell; it becomes usable
//! against a board only after `Dimensions::check` (or `locate` for signed
//! input from callers) accepts it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `(row, col)` cell identifier. Equality is by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The only error the grid store can originate.
///
/// Coordinates are kept signed so that negative input from a caller is
/// reported exactly as it was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate ({row}, {col}) is outside the {rows}x{cols} board")]
pub struct OutOfBounds {
    pub row: i64,
    pub col: i64,
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DimensionsError {
    #[error("board must have at least one row")]
    ZeroRows,
    #[error("board must have at least one column")]
    ZeroCols,
    #[error("board of {rows}x{cols} cells is too large to address")]
    TooLarge { rows: usize, cols: usize },
}

/// Validated board size. Both sides are positive and `rows * cols` fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions", into = "RawDimensions")]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

#[derive(Serialize, Deserialize)]
struct RawDimensions {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = DimensionsError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols)
    }
}

impl From<Dimensions> for RawDimensions {
    fn from(dims: Dimensions) -> Self {
        Self {
            rows: dims.rows,
            cols: dims.cols,
        }
    }
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Self, DimensionsError> {
        if rows == 0 {
            return Err(DimensionsError::ZeroRows);
        }
        if cols == 0 {
            return Err(DimensionsError::ZeroCols);
        }
        if rows.checked_mul(cols).is_none() {
            return Err(DimensionsError::TooLarge { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Total number of cells, `rows * cols`.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        // Checked at construction.
        self.rows * self.cols
    }

    #[must_use]
    pub const fn contains(self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn check(self, coord: Coordinate) -> Result<Coordinate, OutOfBounds> {
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(self.out_of_bounds(saturating_i64(coord.row), saturating_i64(coord.col)))
        }
    }

    /// Validate a signed `(row, col)` pair as supplied by an external caller.
    ///
    /// Negative values and values past either edge are rejected; nothing is
    /// clamped or wrapped.
    pub fn locate(self, row: i64, col: i64) -> Result<Coordinate, OutOfBounds> {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if self.contains(Coordinate::new(r, c)) => Ok(Coordinate::new(r, c)),
            _ => Err(self.out_of_bounds(row, col)),
        }
    }

    /// Row-major index of `coord`: `row * cols + col`.
    #[must_use]
    pub const fn index_of(self, coord: Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    /// Every valid coordinate in row-major order.
    pub fn coordinates(self) -> impl Iterator<Item = Coordinate> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coordinate::new(row, col)))
    }

    fn out_of_bounds(self, row: i64, col: i64) -> OutOfBounds {
        OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
