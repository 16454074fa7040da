//! Cell journal - SQLite-backed record of the last value written to each cell.
//!
//! The journal holds one row per painted cell. Writes upsert, so the table
//! carries the same last-write-wins view as the in-memory store and stays
//! proportional to the number of painted cells.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, params};

use mural_types::{CellValue, Coordinate, Dimensions};

/// A persisted cell as read back from the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub coord: Coordinate,
    pub value: CellValue,
}

/// Persistent store for painted cells.
pub struct CellJournal {
    db: Connection,
}

impl CellJournal {
    const SCHEMA: &'static str = r"
        CREATE TABLE IF NOT EXISTS cells (
            row INTEGER NOT NULL,
            col INTEGER NOT NULL,
            value TEXT NOT NULL,
            written_at TEXT NOT NULL,
            PRIMARY KEY (row, col)
        );

        -- Dimensions the journal was first bound to (single row)
        CREATE TABLE IF NOT EXISTS board_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            rows INTEGER NOT NULL,
            cols INTEGER NOT NULL
        );
    ";

    /// Open or create a journal database at the given path.
    ///
    /// On Unix the database file (and its WAL sidecars) are owner-only, as is
    /// any directory created to hold it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        create_journal_file(path)?;

        let db = Connection::open(path)
            .with_context(|| format!("Failed to open cell journal at {}", path.display()))?;
        let journal = Self::initialize(db)?;
        restrict_sidecars(path);
        Ok(journal)
    }

    /// Open an in-memory journal (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory cell journal")?;
        Self::initialize(db)
    }

    fn initialize(db: Connection) -> Result<Self> {
        db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")
            .context("Failed to set cell journal pragmas")?;
        db.execute_batch(Self::SCHEMA)
            .context("Failed to create cell journal schema")?;
        Ok(Self { db })
    }

    /// Record `dims` on first use and return the dimensions the journal is bound to.
    ///
    /// A journal reopened with different dimensions keeps its original binding;
    /// the caller decides what to do about the mismatch.
    pub fn bind_dimensions(&self, dims: Dimensions) -> Result<Dimensions> {
        self.db
            .execute(
                "INSERT OR IGNORE INTO board_meta (id, rows, cols) VALUES (1, ?1, ?2)",
                params![to_sql_index(dims.rows())?, to_sql_index(dims.cols())?],
            )
            .context("Failed to record board dimensions")?;

        let (rows, cols): (i64, i64) = self
            .db
            .query_row("SELECT rows, cols FROM board_meta WHERE id = 1", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .context("Failed to read board dimensions")?;

        let rows = usize::try_from(rows).context("Stored row count is negative")?;
        let cols = usize::try_from(cols).context("Stored column count is negative")?;
        Dimensions::new(rows, cols).context("Stored board dimensions are invalid")
    }

    /// Upsert the value for `coord`. Last write wins.
    pub fn record(&self, coord: Coordinate, value: &CellValue) -> Result<()> {
        let written_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.db
            .execute(
                "INSERT INTO cells (row, col, value, written_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (row, col)
                 DO UPDATE SET value = excluded.value, written_at = excluded.written_at",
                params![
                    to_sql_index(coord.row())?,
                    to_sql_index(coord.col())?,
                    value.as_str(),
                    &written_at
                ],
            )
            .with_context(|| format!("Failed to record cell {coord}"))?;
        Ok(())
    }

    /// All persisted cells ordered by `(row, col)`.
    ///
    /// Rows that cannot name a cell (negative indices, empty values) are
    /// skipped with a warning.
    pub fn entries(&self) -> Result<Vec<JournalEntry>> {
        let mut stmt = self
            .db
            .prepare(
                "SELECT row, col, value
                 FROM cells
                 ORDER BY row ASC, col ASC",
            )
            .context("Failed to prepare cell query")?;

        let rows = stmt
            .query_map([], |row| {
                let r: i64 = row.get(0)?;
                let c: i64 = row.get(1)?;
                let value: String = row.get(2)?;
                Ok((r, c, value))
            })
            .context("Failed to query cells")?;

        let mut entries = Vec::new();
        for row in rows {
            let (r, c, value) = row.context("Failed to read cell row")?;

            let (Ok(r), Ok(c)) = (usize::try_from(r), usize::try_from(c)) else {
                tracing::warn!(row = r, col = c, "Skipping journal row with negative index");
                continue;
            };
            let Ok(value) = CellValue::new(value) else {
                tracing::warn!(row = r, col = c, "Skipping journal row with empty value");
                continue;
            };

            entries.push(JournalEntry {
                coord: Coordinate::new(r, c),
                value,
            });
        }

        Ok(entries)
    }

    /// Number of persisted cells.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .db
            .query_row("SELECT COUNT(*) FROM cells", [], |row| row.get(0))
            .context("Failed to count cells")?;
        usize::try_from(count).context("Cell count is negative")
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&self, row: i64, col: i64, value: &str) -> Result<()> {
        self.db
            .execute(
                "INSERT INTO cells (row, col, value, written_at) VALUES (?1, ?2, ?3, '')",
                params![row, col, value],
            )
            .context("Failed to insert raw cell")?;
        Ok(())
    }
}

fn to_sql_index(value: usize) -> Result<i64> {
    i64::try_from(value).context("Cell index does not fit in SQLite INTEGER")
}

/// Create the journal file (and a missing parent directory) before SQLite
/// does, so it never exists with the process umask's permissions.
fn create_journal_file(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty())
        && !dir.exists()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create journal directory {}", dir.display()))?;
        // Only directories created here are tightened; an existing one may be shared.
        #[cfg(unix)]
        set_mode(dir, 0o700)?;
    }

    let mut options = OpenOptions::new();
    options.create(true).truncate(false).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
        .open(path)
        .with_context(|| format!("Failed to create cell journal {}", path.display()))?;

    // An existing journal may have been created with looser permissions.
    #[cfg(unix)]
    set_mode(path, 0o600)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

/// Tighten `-wal`/`-shm` files SQLite created next to the journal.
fn restrict_sidecars(path: &Path) {
    #[cfg(unix)]
    for sidecar in ["-wal", "-shm"].map(|suffix| sidecar_path(path, suffix)) {
        if sidecar.exists()
            && let Err(err) = set_mode(&sidecar, 0o600)
        {
            tracing::warn!("Journal sidecar left with default permissions: {err:#}");
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
