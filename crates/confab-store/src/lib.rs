// SQLite boundary layer.
// Everything above this crate works with typed records only; dynamic
// row/column access stops here.

mod db;
mod favorites;
mod schema;

pub use db::{EventStore, SessionLoad};
pub use favorites::{FavoriteKind, FavoritesStore};
pub use schema::{verify_event_file, REQUIRED_TABLES};

use std::fmt;

/// Result type for confab-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// The file is not a structurally valid event data file
    InvalidDataFile(String),

    /// Expected data is absent (e.g. no event row)
    Data(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::InvalidDataFile(msg) => write!(f, "Invalid event data file: {}", msg),
            Error::Data(msg) => write!(f, "Data error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::InvalidDataFile(_) | Error::Data(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
