//! Core domain types for Mural.
//!
//! This crate contains pure domain types with no IO and no synchronization.
//! Everything here can be used from any layer of the workspace.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod cell;
mod geometry;

pub use cell::{Cell, CellValue, EmptyCellValue, UNSET_TOKEN};
pub use geometry::{Coordinate, Dimensions, DimensionsError, OutOfBounds};
