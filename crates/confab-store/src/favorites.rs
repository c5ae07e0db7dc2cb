use crate::Result;
use confab_types::FavoriteSet;
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::path::Path;

/// What a favorite id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteKind {
    Session,
    Speaker,
}

impl FavoriteKind {
    fn as_str(self) -> &'static str {
        match self {
            FavoriteKind::Session => "session",
            FavoriteKind::Speaker => "speaker",
        }
    }
}

type Observer = Box<dyn FnMut(FavoriteKind) + Send>;

/// Write-through favorites persistence in the app-data database.
///
/// Every mutation is durable before the method returns and before any
/// observer fires, so a listener reacting to a change always sees persisted
/// state. Observers are keyed and owner-scoped; re-registering under an
/// existing key replaces the observer in place, and removing an unknown key
/// is a no-op.
pub struct FavoritesStore {
    conn: Connection,
    observers: Vec<(String, Observer)>,
}

impl FavoritesStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                PRIMARY KEY (id, kind)
            );
            "#,
        )?;
        Ok(Self {
            conn,
            observers: Vec::new(),
        })
    }

    pub fn session_ids(&self) -> Result<HashSet<i64>> {
        self.ids_of_kind(FavoriteKind::Session)
    }

    pub fn speaker_ids(&self) -> Result<HashSet<i64>> {
        self.ids_of_kind(FavoriteKind::Speaker)
    }

    /// Snapshot of both id sets, loaded fresh per screen-load.
    pub fn load(&self) -> Result<FavoriteSet> {
        Ok(FavoriteSet {
            sessions: self.session_ids()?,
            speakers: self.speaker_ids()?,
        })
    }

    pub fn add_session(&mut self, id: i64) -> Result<()> {
        self.add(id, FavoriteKind::Session)
    }

    pub fn remove_session(&mut self, id: i64) -> Result<()> {
        self.remove(id, FavoriteKind::Session)
    }

    pub fn add_speaker(&mut self, id: i64) -> Result<()> {
        self.add(id, FavoriteKind::Speaker)
    }

    pub fn remove_speaker(&mut self, id: i64) -> Result<()> {
        self.remove(id, FavoriteKind::Speaker)
    }

    /// Register a change observer under `key`, replacing any observer
    /// already registered under the same key (position preserved).
    pub fn observe<F>(&mut self, key: impl Into<String>, observer: F)
    where
        F: FnMut(FavoriteKind) + Send + 'static,
    {
        let key = key.into();
        if let Some(slot) = self.observers.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = Box::new(observer);
        } else {
            self.observers.push((key, Box::new(observer)));
        }
    }

    /// Safe to call for a key that was never registered.
    pub fn unobserve(&mut self, key: &str) {
        self.observers.retain(|(k, _)| k != key);
    }

    fn add(&mut self, id: i64, kind: FavoriteKind) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO favorites (id, kind) VALUES (?1, ?2)",
            params![id, kind.as_str()],
        )?;
        self.notify(kind);
        Ok(())
    }

    fn remove(&mut self, id: i64, kind: FavoriteKind) -> Result<()> {
        self.conn.execute(
            "DELETE FROM favorites WHERE id = ?1 AND kind = ?2",
            params![id, kind.as_str()],
        )?;
        self.notify(kind);
        Ok(())
    }

    fn ids_of_kind(&self, kind: FavoriteKind) -> Result<HashSet<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM favorites WHERE kind = ?1")?;
        let ids = stmt
            .query_map(params![kind.as_str()], |row| row.get::<_, i64>(0))?
            .collect::<std::result::Result<HashSet<_>, _>>()?;
        Ok(ids)
    }

    fn notify(&mut self, kind: FavoriteKind) {
        for (_, observer) in self.observers.iter_mut() {
            observer(kind);
        }
    }
}
