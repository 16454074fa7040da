//! Core shared state for Mural.
//!
//! The [`GridStore`] is the single authority for board contents. It performs
//! no IO; durability lives in `mural-store`, which wraps a store instance
//! instead of replacing it.

mod board;
mod grid;

pub use board::Board;
pub use grid::GridStore;
pub use mural_types::{Cell, CellValue, Coordinate, Dimensions, OutOfBounds};
