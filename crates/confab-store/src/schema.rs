use crate::{Error, Result};
use rusqlite::{Connection, OpenFlags};
use std::collections::HashSet;
use std::path::Path;

/// Tables an event data file must contain to be considered valid.
/// The updater runs this exact check against a downloaded file before it is
/// allowed anywhere near the active path.
pub const REQUIRED_TABLES: [&str; 6] = [
    "event",
    "days",
    "sessions",
    "speakers",
    "tracks",
    "locations",
];

/// Structural verification of an event data file: it must open as SQLite and
/// contain every required table. Partial or corrupt downloads fail here.
pub fn verify_event_file(path: &Path) -> Result<()> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    verify_required_tables(&conn)
}

pub(crate) fn verify_required_tables(conn: &Connection) -> Result<()> {
    // SQLite opens lazily; a garbage file surfaces as NotADatabase on the
    // first statement, which this query also catches.
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
        .map_err(|e| Error::InvalidDataFile(e.to_string()))?;

    let present: HashSet<String> = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| Error::InvalidDataFile(e.to_string()))?
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| Error::InvalidDataFile(e.to_string()))?;

    for table in REQUIRED_TABLES {
        if !present.contains(table) {
            return Err(Error::InvalidDataFile(format!(
                "missing required table '{}'",
                table
            )));
        }
    }

    Ok(())
}
