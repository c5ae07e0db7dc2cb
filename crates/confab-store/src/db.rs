use crate::schema::verify_required_tables;
use crate::{Error, Result};
use confab_types::{
    EventRecord, IntegrityIssue, LocationRecord, MissingRef, ScheduleDay, SessionRecord,
    SpeakerRecord, TrackRecord,
};
use rusqlite::{params, Connection, OpenFlags};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Result of loading a day's sessions: resolved records plus any rows that
/// were excluded because a foreign key did not resolve. Callers log the
/// issues; they never crash the load.
#[derive(Debug, Clone)]
pub struct SessionLoad {
    pub sessions: Vec<SessionRecord>,
    pub issues: Vec<IntegrityIssue>,
}

/// Read-only access to the active event data file.
///
/// The updater is the only writer of the file and replaces it atomically, so
/// readers open a fresh `EventStore` per load instead of holding one across
/// a potential swap.
pub struct EventStore {
    conn: Connection,
    path: PathBuf,
}

impl EventStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        verify_required_tables(&conn)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The single row of the `event` table. Its absence is a data error.
    pub fn load_event(&self) -> Result<EventRecord> {
        let mut stmt = self.conn.prepare(
            "SELECT title, subtitle, begin_time, end_time, main_color, update_file_url
             FROM event LIMIT 1",
        )?;
        let mut rows = stmt.query_map([], |row| {
            Ok(EventRecord {
                title: row.get(0)?,
                subtitle: row.get(1)?,
                begin_time: row.get(2)?,
                end_time: row.get(3)?,
                main_color: row.get(4)?,
                update_file_url: row.get(5)?,
            })
        })?;

        match rows.next() {
            Some(event) => Ok(event?),
            None => Err(Error::Data("event table is empty".to_string())),
        }
    }

    /// Conference days in chronological order.
    pub fn load_days(&self) -> Result<Vec<ScheduleDay>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, begin_time, end_time FROM days ORDER BY begin_time ASC",
        )?;
        let days = stmt
            .query_map([], |row| {
                Ok(ScheduleDay {
                    title: row.get(0)?,
                    begin_time: row.get(1)?,
                    end_time: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(days)
    }

    /// All speakers ordered by name.
    pub fn load_speakers(&self) -> Result<Vec<SpeakerRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, twitter, url, bio FROM speakers ORDER BY name ASC",
        )?;
        let speakers = stmt
            .query_map([], |row| {
                Ok(SpeakerRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    twitter: row.get(2)?,
                    url: row.get(3)?,
                    bio: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(speakers)
    }

    /// Sessions inside the day window, ascending by start time, with speaker,
    /// track and location resolved. Window bounds are exclusive on both ends.
    ///
    /// Rows whose foreign keys do not resolve are excluded from `sessions`
    /// and reported in `issues`.
    pub fn load_sessions(&self, day: &ScheduleDay) -> Result<SessionLoad> {
        let speakers = self.speaker_map()?;
        let tracks = self.track_map()?;
        let locations = self.location_map()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, title, begin_time, end_time, fk_speaker, fk_track, fk_location
             FROM sessions
             WHERE begin_time > ?1 AND begin_time < ?2
             ORDER BY begin_time ASC, id ASC",
        )?;

        struct RawSession {
            id: i64,
            title: String,
            begin_time: i64,
            end_time: i64,
            fk_speaker: i64,
            fk_track: i64,
            fk_location: i64,
        }

        let raw = stmt
            .query_map(params![day.begin_time, day.end_time], |row| {
                Ok(RawSession {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    begin_time: row.get(2)?,
                    end_time: row.get(3)?,
                    fk_speaker: row.get(4)?,
                    fk_track: row.get(5)?,
                    fk_location: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut sessions = Vec::with_capacity(raw.len());
        let mut issues = Vec::new();

        for row in raw {
            let missing = if !speakers.contains_key(&row.fk_speaker) {
                Some(MissingRef::Speaker(row.fk_speaker))
            } else if !tracks.contains_key(&row.fk_track) {
                Some(MissingRef::Track(row.fk_track))
            } else if !locations.contains_key(&row.fk_location) {
                Some(MissingRef::Location(row.fk_location))
            } else {
                None
            };

            if let Some(missing) = missing {
                issues.push(IntegrityIssue {
                    session_id: row.id,
                    title: row.title,
                    missing,
                });
                continue;
            }

            sessions.push(SessionRecord {
                id: row.id,
                title: row.title,
                begin_time: row.begin_time,
                end_time: row.end_time,
                speaker: speakers[&row.fk_speaker].clone(),
                track: tracks[&row.fk_track].clone(),
                location: locations[&row.fk_location].clone(),
            });
        }

        Ok(SessionLoad { sessions, issues })
    }

    fn speaker_map(&self) -> Result<HashMap<i64, SpeakerRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, twitter, url, bio FROM speakers")?;
        let map = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    SpeakerRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        twitter: row.get(2)?,
                        url: row.get(3)?,
                        bio: row.get(4)?,
                    },
                ))
            })?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;
        Ok(map)
    }

    fn track_map(&self) -> Result<HashMap<i64, TrackRecord>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM tracks")?;
        let map = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    TrackRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    },
                ))
            })?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;
        Ok(map)
    }

    fn location_map(&self) -> Result<HashMap<i64, LocationRecord>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM locations")?;
        let map = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    LocationRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    },
                ))
            })?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;
        Ok(map)
    }
}
