//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use mural::{Backend, Shell};
use mural_core::GridStore;
use mural_store::{CellJournal, PersistentGrid};
use mural_types::{CellValue, Dimensions};

pub fn dims(rows: usize, cols: usize) -> Dimensions {
    Dimensions::new(rows, cols).expect("test dimensions are positive")
}

pub fn value(raw: &str) -> CellValue {
    CellValue::new(raw).expect("test color is non-empty")
}

pub fn store(rows: usize, cols: usize) -> Arc<GridStore> {
    GridStore::shared(dims(rows, cols))
}

/// A journaled grid backed by `path`, replaying whatever is already there.
pub fn journaled(path: &Path, rows: usize, cols: usize) -> PersistentGrid {
    let journal = CellJournal::open(path).expect("open journal");
    PersistentGrid::open(dims(rows, cols), journal).expect("replay journal")
}

pub fn memory_shell(rows: usize, cols: usize) -> Shell {
    Shell::new(Backend::Memory(store(rows, cols)))
}

pub fn journaled_shell(path: &Path, rows: usize, cols: usize) -> Shell {
    Shell::new(Backend::Journaled(journaled(path, rows, cols)))
}

/// Feed `script` to the shell and return its output lines.
pub fn run_script(shell: &Shell, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    shell.run(script.as_bytes(), &mut out).expect("shell run");
    String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(ToString::to_string)
        .collect()
}
