use crate::updater::DataFileUpdater;
use crate::{Config, Error, Result};
use confab_store::{EventStore, FavoritesStore};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CONFAB_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.confab (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CONFAB_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("confab"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".confab"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let (Some(stripped), Some(home)) = (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Explicitly constructed application context: the single initialization
/// point for paths, config and store handles. Components receive this by
/// reference instead of reaching for process-wide singletons.
///
/// The event store is opened per use rather than cached: the updater may
/// atomically replace the data file at any time, and readers pick up the
/// new file by reopening.
pub struct AppContext {
    data_dir: PathBuf,
    config: OnceCell<Config>,
}

impl AppContext {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            config: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn event_file(&self) -> PathBuf {
        self.data_dir.join("event.db")
    }

    pub fn appdata_file(&self) -> PathBuf {
        self.data_dir.join("appdata.db")
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Config::load_from(&self.config_path()))
    }

    pub fn open_event_store(&self) -> Result<EventStore> {
        Ok(EventStore::open(&self.event_file())?)
    }

    pub fn open_favorites(&self) -> Result<FavoritesStore> {
        Ok(FavoritesStore::open(&self.appdata_file())?)
    }

    /// Build an updater for the active event file, or `None` when neither
    /// the config nor the event row names a remote URL.
    pub fn updater(&self) -> Result<Option<DataFileUpdater>> {
        let config = self.config()?;

        let url = match &config.remote_url {
            Some(url) => Some(url.clone()),
            None => self.open_event_store()?.load_event()?.update_file_url,
        };

        let timeout = Duration::from_secs(config.request_timeout_secs);
        Ok(url.map(|url| DataFileUpdater::new(url, self.event_file()).with_timeout(timeout)))
    }
}
