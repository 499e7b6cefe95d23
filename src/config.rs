//! Application configuration loaded from a JSON file.
//!
//! Every field has a default, so a missing file (or a partial one) yields a
//! working configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_ENV: &str = "SPOTIFY_BROWSE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = ".config/spotify-browse.json";

const DEFAULT_CLIENT_ID: &str = "492e1e45ea814fa3ac555fe1576aaf5b";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8898/login";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub cache_dir: PathBuf,
    pub log_dir: PathBuf,
    pub dark_mode: bool,
    pub playback_poll_ms: u64,
    pub search_limit: u32,
    #[serde(skip)]
    pub(crate) path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            cache_dir: PathBuf::from(".cache"),
            log_dir: PathBuf::from(".logs"),
            dark_mode: true,
            playback_poll_ms: 1000,
            search_limit: 20,
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl AppConfig {
    /// Load from `$SPOTIFY_BROWSE_CONFIG`, falling back to the default path.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<AppConfig>(&content)
                .with_context(|| format!("parsing config {}", path.display()))?
        } else {
            AppConfig::default()
        };
        config.path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing config {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn refresh_token_file(&self) -> PathBuf {
        self.cache_dir.join("refresh_token")
    }

    pub fn playback_poll_interval(&self) -> Duration {
        Duration::from_millis(self.playback_poll_ms.max(250))
    }
}
