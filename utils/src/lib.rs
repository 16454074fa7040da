//! Shared infrastructure utilities for Mural.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename), used for
//!   board exports

pub mod atomic_write;

pub use atomic_write::{
    AtomicWriteOptions, FileSyncPolicy, ParentDirSyncPolicy, atomic_write,
    atomic_write_with_options,
};
