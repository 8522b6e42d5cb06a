//! Settings persistence.
//!
//! [`SettingsStore`] owns the in-memory settings for the process and talks to
//! a [`SettingsBackend`] for durable storage. Load failures fall back to
//! defaults; save failures are returned to the caller but never roll back the
//! in-memory value.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::Settings;
use crate::error::ConfigError;

/// Directory name under the user configuration directory.
pub const APP_DIR: &str = "pomocycle";
/// Fixed file name of the settings document.
pub const SETTINGS_FILE: &str = "settings.toml";
/// Upper bound on a single backend write.
pub const DEFAULT_SAVE_TIMEOUT: Duration = Duration::from_secs(2);

/// Durable storage for [`Settings`].
pub trait SettingsBackend: Send + Sync {
    /// Read the stored settings. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Settings>, ConfigError>;

    fn save(&self, settings: &Settings) -> Result<(), ConfigError>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}

/// TOML document on the local filesystem.
#[derive(Debug, Clone)]
pub struct TomlFileBackend {
    path: PathBuf,
}

impl TomlFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `<dir>/settings.toml`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Returns `<user config dir>/pomocycle`.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if the platform has no config directory.
pub fn default_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

impl SettingsBackend for TomlFileBackend {
    fn load(&self) -> Result<Option<Settings>, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
        };
        Settings::from_toml(&content).map(Some)
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let content = settings.to_toml()?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| ConfigError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write via temp file, fsync, rename, so a crash leaves either the old or
/// the new document.
///
/// Every call gets its own uniquely named temp file, so a writer left over
/// from a timed-out save cannot clobber a newer one.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?;
    fs::create_dir_all(parent)?;

    let prefix = format!(".{}.", path.file_name().unwrap_or_default().to_string_lossy());
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    // On failure the temp file is removed when the returned error drops it.
    temp.persist(path).map_err(|e| e.error)?;

    #[cfg(unix)]
    {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// The process-wide owner of the current settings.
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    current: Settings,
    persisted: bool,
    save_timeout: Duration,
}

impl SettingsStore {
    /// Load settings from `backend`, falling back to defaults.
    pub fn open(backend: Arc<dyn SettingsBackend>) -> Self {
        let loaded = Self::load_from(backend.as_ref());
        let persisted = loaded.is_some();
        Self {
            backend,
            current: loaded.unwrap_or_default(),
            persisted,
            save_timeout: DEFAULT_SAVE_TIMEOUT,
        }
    }

    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.save_timeout = timeout;
        self
    }

    /// The authoritative in-memory settings.
    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Whether the in-memory settings match what was last read or written.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Read the backend again. `None` when absent or unreadable.
    pub fn load(&self) -> Option<Settings> {
        Self::load_from(self.backend.as_ref())
    }

    fn load_from(backend: &dyn SettingsBackend) -> Option<Settings> {
        match backend.load() {
            Ok(Some(settings)) => {
                debug!(location = %backend.location(), "loaded settings");
                Some(settings)
            }
            Ok(None) => {
                info!(location = %backend.location(), "no stored settings, using defaults");
                None
            }
            Err(e) => {
                warn!(location = %backend.location(), error = %e, "unreadable settings, using defaults");
                None
            }
        }
    }

    /// Replace the in-memory settings and persist them.
    ///
    /// Once validated, the in-memory value is updated even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] without touching anything if
    /// `settings` fails [`Settings::validate`]. Otherwise returns the backend's
    /// error, or [`ConfigError::SaveTimedOut`] if the write does not finish
    /// within the save timeout.
    pub fn save(&mut self, settings: Settings) -> Result<(), ConfigError> {
        if let Err(e) = settings.validate() {
            warn!(error = %e, "refusing to save invalid settings");
            return Err(e);
        }
        self.current = settings.clone();
        self.persisted = false;

        let backend = Arc::clone(&self.backend);
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("settings-save".to_string())
            .spawn(move || {
                let _ = tx.send(backend.save(&settings));
            })
            .map_err(|e| ConfigError::SaveFailed {
                path: PathBuf::from(self.backend.location()),
                message: e.to_string(),
            })?;

        let result = match rx.recv_timeout(self.save_timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(ConfigError::SaveTimedOut {
                timeout: self.save_timeout,
            }),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ConfigError::SaveFailed {
                path: PathBuf::from(self.backend.location()),
                message: "save worker exited without a result".into(),
            }),
        };

        match &result {
            Ok(()) => {
                self.persisted = true;
                info!(location = %self.backend.location(), "saved settings");
            }
            Err(e) => warn!(error = %e, "failed to save settings, keeping them in memory"),
        }
        result
    }
}
