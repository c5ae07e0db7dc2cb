use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the data file's own `update_file_url` when set.
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Read timeout for the update download, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Display offset from UTC for schedule time labels.
    #[serde(default)]
    pub utc_offset_secs: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: None,
            request_timeout_secs: default_timeout(),
            utc_offset_secs: 0,
        }
    }
}

impl Config {
    /// Missing file means defaults, not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_is_absent() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.utc_offset_secs, 0);
        assert!(config.remote_url.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config =
            toml::from_str("remote_url = \"https://example.com/event.db\"").unwrap();
        assert_eq!(
            config.remote_url.as_deref(),
            Some("https://example.com/event.db")
        );
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            remote_url: Some("https://example.com/event.db".to_string()),
            request_timeout_secs: 5,
            utc_offset_secs: 7200,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.remote_url, config.remote_url);
        assert_eq!(loaded.request_timeout_secs, 5);
        assert_eq!(loaded.utc_offset_secs, 7200);
    }
}
