use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A speaker row from the event data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerRecord {
    pub id: i64,
    pub name: String,
    pub twitter: Option<String>,
    pub url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
}

/// A session with its speaker, track and location already resolved.
///
/// Rows whose foreign keys do not resolve never become a `SessionRecord`;
/// they are reported as [`IntegrityIssue`]s by the store instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub title: String,
    /// Epoch seconds. Always earlier than `end_time`.
    pub begin_time: i64,
    pub end_time: i64,
    pub speaker: SpeakerRecord,
    pub track: TrackRecord,
    pub location: LocationRecord,
}

/// The single row of the `event` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    pub subtitle: Option<String>,
    pub begin_time: i64,
    pub end_time: i64,
    pub main_color: Option<String>,
    /// When set, a remote replacement for the data file can be fetched
    /// from this URL.
    pub update_file_url: Option<String>,
}

/// One conference day: the window used to bound the session query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// Display title, e.g. "Day 1". Also the string matched by
    /// scroll-to-current requests.
    pub title: String,
    pub begin_time: i64,
    pub end_time: i64,
}

/// User-marked sessions and speakers, loaded fresh per screen-load and
/// persisted write-through by the favorites store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSet {
    pub sessions: HashSet<i64>,
    pub speakers: HashSet<i64>,
}

impl FavoriteSet {
    /// Favorite-membership predicate used by the schedule filter: a session
    /// counts as favorited when the session itself or its speaker is marked.
    pub fn contains_session(&self, session: &SessionRecord) -> bool {
        self.sessions.contains(&session.id) || self.speakers.contains(&session.speaker.id)
    }

    pub fn contains_speaker(&self, speaker_id: i64) -> bool {
        self.speakers.contains(&speaker_id)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.speakers.is_empty()
    }
}

/// Which reference on a session row failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MissingRef {
    Speaker(i64),
    Track(i64),
    Location(i64),
}

/// A session row excluded from output because of an unresolved foreign key.
/// A data error, not a crash: callers are expected to surface these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub session_id: i64,
    pub title: String,
    pub missing: MissingRef,
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (what, id) = match self.missing {
            MissingRef::Speaker(id) => ("speaker", id),
            MissingRef::Track(id) => ("track", id),
            MissingRef::Location(id) => ("location", id),
        };
        write!(
            f,
            "session {} ({:?}) references missing {} {}",
            self.session_id, self.title, what, id
        )
    }
}
