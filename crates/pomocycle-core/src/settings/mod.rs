//! User settings.
//!
//! Stores user preferences including:
//! - Session durations per kind
//! - The long break interval
//! - Auto-start flags per kind
//! - Notification preferences
//!
//! The persisted document is TOML at `<config dir>/pomocycle/settings.toml`,
//! see [`store`]. Durations are written as whole seconds.

pub mod form;
pub mod store;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::{KindMap, SessionKind};

pub use form::{Bounds, FieldId, FieldInput, FormField, SettingsForm};
pub use store::{SettingsBackend, SettingsStore, TomlFileBackend};

/// Notification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub sound: bool,
    pub push: bool,
}

/// Application settings.
///
/// Field order matters for TOML output: plain values first, tables after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Completed work sessions before a long break. `0` disables long breaks.
    pub work_sessions_until_long_break: u32,
    pub show_progress_bar: bool,
    #[serde(with = "duration_secs")]
    pub durations: KindMap<Duration>,
    pub notification: NotificationSettings,
    pub auto_start: KindMap<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_sessions_until_long_break: 4,
            show_progress_bar: true,
            durations: KindMap::new(
                Duration::from_secs(25 * 60),
                Duration::from_secs(5 * 60),
                Duration::from_secs(15 * 60),
            ),
            notification: NotificationSettings {
                sound: true,
                push: true,
            },
            auto_start: KindMap::new(true, true, true),
        }
    }
}

impl Settings {
    pub fn duration(&self, kind: SessionKind) -> Duration {
        self.durations[kind]
    }

    pub fn auto_starts(&self, kind: SessionKind) -> bool {
        self.auto_start[kind]
    }

    /// Check the invariants serde cannot express.
    ///
    /// Accepted values are exactly those the settings form can represent, so
    /// a document that passes survives an unedited trip through the form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a duration is zero, is not a
    /// whole number of minutes, or exceeds [`form::MAX_VALUE`] minutes, or if
    /// the long break interval exceeds [`form::MAX_VALUE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, duration) in self.durations.iter() {
            let invalid = |message: String| ConfigError::InvalidValue {
                key: format!("durations.{}", duration_key(kind)),
                message,
            };
            if duration.is_zero() {
                return Err(invalid("duration must be positive".into()));
            }
            if duration.subsec_nanos() != 0 || duration.as_secs() % 60 != 0 {
                return Err(invalid("duration must be a whole number of minutes".into()));
            }
            if duration.as_secs() / 60 > u64::from(form::MAX_VALUE) {
                return Err(invalid(format!("duration must be at most {} minutes", form::MAX_VALUE)));
            }
        }
        if self.work_sessions_until_long_break > form::MAX_VALUE {
            return Err(ConfigError::InvalidValue {
                key: "work_sessions_until_long_break".into(),
                message: format!("must be at most {}", form::MAX_VALUE),
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML settings document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the settings shape
    /// (including a missing duration entry) or fails [`Settings::validate`].
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render the settings as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}

fn duration_key(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Work => "work",
        SessionKind::Break => "break",
        SessionKind::LongBreak => "long_break",
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::session::KindMap;

    pub fn serialize<S: Serializer>(value: &KindMap<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<KindMap<Duration>, D::Error> {
        let secs = KindMap::<u64>::deserialize(deserializer)?;
        Ok(secs.map(|s| Duration::from_secs(*s)))
    }
}
