// lib/src/config.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;

use crate::errors::{PhrError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_INSIGHTS_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_VOICE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONFIG_FILE: &str = "lifetrack.toml";
pub const ENV_PREFIX: &str = "LIFETRACK";
/// Base URL variable understood by the web build of the client.
pub const LEGACY_API_URL_VAR: &str = "REACT_APP_API_URL";

/// Client settings, layered as: built-in defaults, then `lifetrack.toml`
/// (or an explicit `--config` file), then `LIFETRACK_*` environment
/// variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Applies to every request without a longer timeout of its own.
    pub timeout_secs: u64,
    pub insights_timeout_secs: u64,
    /// Voice parsing and chat.
    pub voice_timeout_secs: u64,
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            insights_timeout_secs: DEFAULT_INSIGHTS_TIMEOUT_SECS,
            voice_timeout_secs: DEFAULT_VOICE_TIMEOUT_SECS,
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Loads `.env`, then the layered configuration from the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();
        let mut loaded = Self::load_with(config_file, Environment::with_prefix(ENV_PREFIX))?;
        if let Ok(url) = std::env::var(LEGACY_API_URL_VAR) {
            if std::env::var(format!("{}_API_BASE_URL", ENV_PREFIX)).is_err() && !url.trim().is_empty() {
                loaded.api_base_url = url;
            }
        }
        debug!("Client configuration: {:?}", loaded);
        Ok(loaded)
    }

    fn load_with(config_file: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let loaded: ClientConfig = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("insights_timeout_secs", DEFAULT_INSIGHTS_TIMEOUT_SECS as i64)?
            .set_default("voice_timeout_secs", DEFAULT_VOICE_TIMEOUT_SECS as i64)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        if loaded.api_base_url.trim().is_empty() {
            return Err(PhrError::Configuration("api_base_url must not be empty".to_string()));
        }
        Ok(loaded)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn insights_timeout(&self) -> Duration {
        Duration::from_secs(self.insights_timeout_secs)
    }

    pub fn voice_timeout(&self) -> Duration {
        Duration::from_secs(self.voice_timeout_secs)
    }

    /// Where the session is persisted: the configured file, or
    /// `<config dir>/lifetrack/session.json`.
    pub fn session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("lifetrack").join("session.json"))
            .ok_or_else(|| PhrError::Configuration("Could not determine the user config directory".to_string()))
    }
}
