use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Progress of one update cycle, reported to the invoking caller only.
/// Registered replace actions are a separate channel and fire solely on a
/// successful swap.
#[derive(Debug, Clone)]
pub enum UpdateProgress {
    Downloading { url: String },
    Downloaded { bytes: u64 },
    Verified,
    Replaced { path: PathBuf },
    Failed { reason: String },
}

/// Terminal result of one update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The active file was swapped and every replace action fired once.
    Replaced,
    /// Download or verification failed; the active file is untouched and no
    /// replace action fired. Retry policy is the caller's business.
    Failed,
    /// A cycle was already in flight for this instance; nothing happened.
    AlreadyRunning,
}

type ReplaceAction = Arc<dyn Fn(&Path) + Send + Sync>;

struct Shared {
    busy: AtomicBool,
    actions: Mutex<Vec<(String, ReplaceAction)>>,
}

/// One-shot fetch / verify / swap of the active event data file.
///
/// Cycle: download the remote file to a temp sibling of the target, verify
/// it is a structurally valid event data file, then atomically rename it
/// over the target. The active file is never partially overwritten; a
/// failed cycle leaves it byte-for-byte untouched and fires nothing.
///
/// When a refresh is triggered is external policy; this type provides only
/// the single cycle plus keyed replace-action fan-out. There is no retry
/// and no cancellation: the transport timeouts are the only bound.
pub struct DataFileUpdater {
    remote_url: String,
    target_path: PathBuf,
    read_timeout: Duration,
    shared: Arc<Shared>,
}

impl DataFileUpdater {
    pub fn new(remote_url: impl Into<String>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            remote_url: remote_url.into(),
            target_path: target_path.into(),
            read_timeout: Duration::from_secs(30),
            shared: Arc::new(Shared {
                busy: AtomicBool::new(false),
                actions: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn with_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Begin a fetch cycle as soon as construction completes, equivalent to
    /// one `start()` call on the finished value. Overlap rules are unchanged:
    /// a later `start()` while that cycle is in flight is rejected.
    pub fn with_autostart(self) -> Self {
        self.start();
        self
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Register a replace action under `key`. Re-registering an existing key
    /// replaces the action in place, keeping its position in the invocation
    /// order. Actions run synchronously, in registration order, exactly once
    /// per successful swap, and receive the active file path.
    pub fn add_action<F>(&self, key: impl Into<String>, action: F)
    where
        F: Fn(&Path) + Send + Sync + 'static,
    {
        let key = key.into();
        let mut actions = self.shared.actions.lock().expect("actions lock poisoned");
        if let Some(slot) = actions.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = Arc::new(action);
        } else {
            actions.push((key, Arc::new(action)));
        }
    }

    /// Safe to call for a key that was never registered.
    pub fn remove_action(&self, key: &str) {
        self.shared
            .actions
            .lock()
            .expect("actions lock poisoned")
            .retain(|(k, _)| k != key);
    }

    /// Whether a cycle is currently in flight for this instance.
    pub fn is_busy(&self) -> bool {
        self.shared.busy.load(Ordering::SeqCst)
    }

    /// Kick off one cycle on a background thread. Returns `false` without
    /// doing anything when a cycle is already in flight (never queued).
    pub fn start(&self) -> bool {
        if !try_acquire(&self.shared.busy) {
            return false;
        }

        let shared = Arc::clone(&self.shared);
        let url = self.remote_url.clone();
        let target = self.target_path.clone();
        let read_timeout = self.read_timeout;

        let spawned = std::thread::Builder::new()
            .name("confab-updater".to_string())
            .spawn(move || {
                execute(&shared, &url, &target, read_timeout, &mut |_| {});
            });

        match spawned {
            Ok(_) => true,
            Err(_) => {
                self.shared.busy.store(false, Ordering::SeqCst);
                false
            }
        }
    }

    /// Run one cycle on the calling thread, reporting progress as it goes.
    pub fn run_once<F>(&self, mut on_progress: F) -> UpdateOutcome
    where
        F: FnMut(UpdateProgress),
    {
        if !try_acquire(&self.shared.busy) {
            return UpdateOutcome::AlreadyRunning;
        }
        execute(
            &self.shared,
            &self.remote_url,
            &self.target_path,
            self.read_timeout,
            &mut on_progress,
        )
    }
}

fn try_acquire(busy: &AtomicBool) -> bool {
    busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

/// Releases the busy flag on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// Caller must hold the busy flag; released on return.
fn execute(
    shared: &Shared,
    url: &str,
    target: &Path,
    read_timeout: Duration,
    on_progress: &mut dyn FnMut(UpdateProgress),
) -> UpdateOutcome {
    let _guard = BusyGuard(&shared.busy);

    on_progress(UpdateProgress::Downloading {
        url: url.to_string(),
    });

    let (temp, bytes) = match download(url, target, read_timeout) {
        Ok(ok) => ok,
        Err(reason) => {
            on_progress(UpdateProgress::Failed { reason });
            return UpdateOutcome::Failed;
        }
    };
    on_progress(UpdateProgress::Downloaded { bytes });

    // Dropping `temp` on the failure paths deletes the partial download.
    if let Err(err) = confab_store::verify_event_file(temp.path()) {
        on_progress(UpdateProgress::Failed {
            reason: err.to_string(),
        });
        return UpdateOutcome::Failed;
    }
    on_progress(UpdateProgress::Verified);

    // Rename over the target: all-or-nothing, no window where the path is
    // missing or half-written. The temp file lives in the target's directory
    // so the rename never crosses a filesystem.
    if let Err(err) = temp.persist(target) {
        on_progress(UpdateProgress::Failed {
            reason: format!("cannot replace {}: {}", target.display(), err),
        });
        return UpdateOutcome::Failed;
    }
    on_progress(UpdateProgress::Replaced {
        path: target.to_path_buf(),
    });

    // Snapshot the registry so actions run outside the lock; an action may
    // itself re-register.
    let actions: Vec<ReplaceAction> = shared
        .actions
        .lock()
        .expect("actions lock poisoned")
        .iter()
        .map(|(_, action)| Arc::clone(action))
        .collect();
    for action in actions {
        action(target);
    }

    UpdateOutcome::Replaced
}

fn download(
    url: &str,
    target: &Path,
    read_timeout: Duration,
) -> std::result::Result<(NamedTempFile, u64), String> {
    let dir = target
        .parent()
        .ok_or_else(|| format!("target path {} has no parent directory", target.display()))?;
    let mut temp =
        NamedTempFile::new_in(dir).map_err(|e| format!("cannot create temp file: {}", e))?;

    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(15))
        .timeout_read(read_timeout)
        .build();

    let response = agent
        .get(url)
        .call()
        .map_err(|e| format!("download failed: {}", e))?;

    let mut reader = response.into_reader();
    let bytes = std::io::copy(&mut reader, temp.as_file_mut())
        .map_err(|e| format!("download write failed: {}", e))?;

    Ok((temp, bytes))
}
