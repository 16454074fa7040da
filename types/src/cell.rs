//! Cell contents: the opaque color token and the unset sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token reported for a cell with no write history.
pub const UNSET_TOKEN: &str = "";

/// An opaque color token, e.g. a hex triplet such as `"ff8800"`.
///
/// Content is not interpreted. The only rule is that the token is not empty,
/// so a painted cell can never be mistaken for [`UNSET_TOKEN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellValue(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell value must not be empty")]
pub struct EmptyCellValue;

impl CellValue {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyCellValue> {
        let value = value.into();
        if value.is_empty() {
            Err(EmptyCellValue)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for CellValue {
    type Error = EmptyCellValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CellValue {
    type Error = EmptyCellValue;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CellValue> for String {
    fn from(value: CellValue) -> Self {
        value.0
    }
}

impl AsRef<str> for CellValue {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a read reports for one cell.
///
/// Serializes as a plain token: the color for painted cells, [`UNSET_TOKEN`]
/// for unset ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cell {
    #[default]
    Unset,
    Painted(CellValue),
}

impl Cell {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Unset => UNSET_TOKEN,
            Cell::Painted(value) => value.as_str(),
        }
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Cell::Unset)
    }

    #[must_use]
    pub fn into_token(self) -> String {
        match self {
            Cell::Unset => String::from(UNSET_TOKEN),
            Cell::Painted(value) => value.into_inner(),
        }
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Cell::Painted(value)
    }
}

impl From<Option<CellValue>> for Cell {
    fn from(value: Option<CellValue>) -> Self {
        value.map_or(Cell::Unset, Cell::Painted)
    }
}

impl From<String> for Cell {
    fn from(token: String) -> Self {
        CellValue::new(token).map_or(Cell::Unset, Cell::Painted)
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.into_token()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
