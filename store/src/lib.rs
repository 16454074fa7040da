//! Optional durability for the Mural grid store.
//!
//! The grid store stays purely in-memory. This crate puts it in front of an
//! explicit persistence collaborator:
//!
//! ```text
//! PersistentGrid
//! ├── store: GridStore        (all reads, cached board state)
//! └── journal: CellJournal    (SQLite, one row per painted cell)
//! ```

mod journal;
mod persistent;

pub use journal::{CellJournal, JournalEntry};
pub use persistent::{PersistError, PersistentGrid, ReplayReport};
