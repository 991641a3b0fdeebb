use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::{self, DEFAULT_REFRESH_SECS};
use crate::session::{Session, UserType};
use crate::strings::Strings;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no config directory")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub user_id: String,
    pub receiver_id: String,
    pub user_type: UserType,
    pub request_timeout_secs: u64,
    /// Chat history reload period while the chat page is shown; 0 disables it.
    pub chat_refresh_secs: u64,
    pub strings: Strings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_id: String::new(),
            receiver_id: String::new(),
            user_type: UserType::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            chat_refresh_secs: DEFAULT_REFRESH_SECS,
            strings: Strings::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    // TOML is the settings format. A JSON file left by older builds is read
    // once and rewritten as TOML.
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("evac-connect.toml"))
    }

    fn legacy_json_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("org", "evac", "EvacConnect")?;
        Some(proj.config_dir().join("settings.json"))
    }

    pub fn load() -> Self {
        if let Some(path) = Self::toml_path() {
            match Self::load_from(&path) {
                Ok(settings) => return settings,
                Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("ignoring {}: {e}", path.display()),
            }
        }

        if let Some(legacy) = Self::legacy_json_path() {
            if let Ok(bytes) = fs::read(&legacy) {
                match serde_json::from_slice::<Settings>(&bytes) {
                    Ok(settings) => {
                        log::info!("migrating {} to TOML", legacy.display());
                        if let Err(e) = settings.save() {
                            log::warn!("could not migrate legacy settings: {e}");
                        }
                        return settings;
                    }
                    Err(e) => log::warn!("ignoring {}: {e}", legacy.display()),
                }
            }
        }

        Self::new()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::toml_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Server and identity are known; the receiver may still be blank.
    pub fn is_complete(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.user_id.trim().is_empty()
    }

    pub fn session(&self) -> Session {
        Session {
            user_id: self.user_id.trim().to_string(),
            receiver_id: self.receiver_id.trim().to_string(),
            user_type: self.user_type,
        }
    }

    /// Zero disables the timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn chat_refresh(&self) -> Option<Duration> {
        chat::refresh_interval(self.chat_refresh_secs)
    }
}
