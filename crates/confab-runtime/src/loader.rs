use confab_engine::{filter_favorites, Schedule, ScheduleSection};
use confab_store::{EventStore, FavoritesStore};
use confab_types::{IntegrityIssue, ScheduleDay};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread::JoinHandle;

/// What a background schedule load should compute.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub event_file: PathBuf,
    pub appdata_file: PathBuf,
    pub day: ScheduleDay,
    pub favorites_only: bool,
    pub utc_offset_secs: i32,
}

/// The single completion message of a schedule load.
#[derive(Debug, Clone)]
pub enum ScheduleOutcome {
    Loaded {
        sections: Vec<ScheduleSection>,
        issues: Vec<IntegrityIssue>,
    },
    Failed(String),
}

/// Handle to an in-flight schedule load.
pub struct ScheduleTask {
    rx: Receiver<ScheduleOutcome>,
    _handle: JoinHandle<()>,
}

impl ScheduleTask {
    /// Block until the worker finishes. Exactly one outcome arrives per
    /// spawned load.
    pub fn wait(self) -> ScheduleOutcome {
        self.rx.recv().unwrap_or_else(|_| {
            ScheduleOutcome::Failed("schedule worker ended unexpectedly".to_string())
        })
    }
}

/// Load, filter and group a day's sessions off the presentation thread.
///
/// The worker opens its own store handles per invocation, so it tolerates
/// the data file having been atomically replaced since the last load.
/// Favorites are re-read fresh each time; filtering happens before grouping.
pub fn spawn_schedule_load(request: ScheduleRequest) -> std::io::Result<ScheduleTask> {
    let (tx, rx) = channel();

    let handle = std::thread::Builder::new()
        .name("confab-schedule".to_string())
        .spawn(move || {
            let _ = tx.send(load(&request));
        })?;

    Ok(ScheduleTask {
        rx,
        _handle: handle,
    })
}

fn load(request: &ScheduleRequest) -> ScheduleOutcome {
    let store = match EventStore::open(&request.event_file) {
        Ok(store) => store,
        Err(err) => return ScheduleOutcome::Failed(err.to_string()),
    };

    let load = match store.load_sessions(&request.day) {
        Ok(load) => load,
        Err(err) => return ScheduleOutcome::Failed(err.to_string()),
    };

    let sessions = if request.favorites_only {
        let favorites = match FavoritesStore::open(&request.appdata_file)
            .and_then(|favorites| favorites.load())
        {
            Ok(favorites) => favorites,
            Err(err) => return ScheduleOutcome::Failed(err.to_string()),
        };
        filter_favorites(load.sessions, &favorites)
    } else {
        load.sessions
    };

    let sections = Schedule::new(request.utc_offset_secs).group_sessions_by_start_time(sessions);

    ScheduleOutcome::Loaded {
        sections,
        issues: load.issues,
    }
}
