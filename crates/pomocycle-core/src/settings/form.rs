//! Editable projection of [`Settings`] for the settings page.
//!
//! The form is a fixed, ordered list of fields. Toggle fields hold a bool,
//! number fields hold an unsigned value clamped to optional bounds. Durations
//! are edited in whole minutes.

use std::time::Duration;

use serde::Serialize;

use super::{NotificationSettings, Settings};
use crate::session::{KindMap, SessionKind};

/// Smallest duration a user can enter, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Largest value any number field accepts.
pub const MAX_VALUE: u32 = 9999;

/// Identifies which [`Settings`] field a form entry maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Minutes(SessionKind),
    LongBreakInterval,
    AutoStart(SessionKind),
    SoundNotification,
    PushNotification,
    ShowProgressBar,
}

/// Inclusive bounds for a number field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// The editable value of a field, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldInput {
    Toggle(bool),
    Number { value: u32, bounds: Option<Bounds> },
}

impl FieldInput {
    fn number(value: u32, bounds: Bounds) -> Self {
        FieldInput::Number {
            value: bounds.clamp(value),
            bounds: Some(bounds),
        }
    }

    /// Toggle: force on. Number: add one, clamped.
    pub fn increase(&mut self) {
        match self {
            FieldInput::Toggle(on) => *on = true,
            FieldInput::Number { value, bounds } => {
                let next = value.saturating_add(1);
                *value = bounds.map_or(next, |b| b.clamp(next));
            }
        }
    }

    /// Toggle: force off. Number: subtract one, clamped.
    pub fn decrease(&mut self) {
        match self {
            FieldInput::Toggle(on) => *on = false,
            FieldInput::Number { value, bounds } => {
                let next = value.saturating_sub(1);
                *value = bounds.map_or(next, |b| b.clamp(next));
            }
        }
    }

    /// Toggle: flip. Number: no-op.
    pub fn toggle(&mut self) {
        if let FieldInput::Toggle(on) = self {
            *on = !*on;
        }
    }

    /// The field's value as an integer: `0`/`1` for toggles.
    pub fn value(&self) -> u32 {
        match self {
            FieldInput::Toggle(on) => u32::from(*on),
            FieldInput::Number { value, .. } => *value,
        }
    }

    fn as_bool(&self) -> bool {
        self.value() == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub id: FieldId,
    pub title: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn toggle(id: FieldId, title: &'static str, on: bool) -> Self {
        Self {
            id,
            title,
            input: FieldInput::Toggle(on),
        }
    }

    fn number(id: FieldId, title: &'static str, value: u32, bounds: Bounds) -> Self {
        Self {
            id,
            title,
            input: FieldInput::number(value, bounds),
        }
    }
}

const MINUTES_BOUNDS: Bounds = Bounds {
    min: MIN_MINUTES,
    max: MAX_VALUE,
};
const INTERVAL_BOUNDS: Bounds = Bounds { min: 0, max: MAX_VALUE };

fn whole_minutes(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs() / 60).unwrap_or(u32::MAX)
}

/// Cursor-addressable settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    fields: Vec<FormField>,
    cursor: usize,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fields: build_fields(settings),
            cursor: 0,
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &FormField {
        &self.fields[self.cursor]
    }

    /// Move the cursor by `delta`, clamped to the field list.
    pub fn move_cursor(&mut self, delta: i32) {
        let last = self.fields.len().saturating_sub(1) as i64;
        let target = (self.cursor as i64 + delta as i64).clamp(0, last);
        self.cursor = target as usize;
    }

    pub fn increase(&mut self) {
        self.fields[self.cursor].input.increase();
    }

    pub fn decrease(&mut self) {
        self.fields[self.cursor].input.decrease();
    }

    pub fn toggle_current(&mut self) {
        self.fields[self.cursor].input.toggle();
    }

    /// Rebuild every field from [`Settings::default`]. The cursor stays put.
    pub fn reset_to_defaults(&mut self) {
        self.fields = build_fields(&Settings::default());
    }

    fn input(&self, id: FieldId) -> FieldInput {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.input)
            .unwrap_or(FieldInput::Toggle(false))
    }

    /// Map the field values back to a full [`Settings`] record.
    pub fn to_settings(&self) -> Settings {
        let minutes = |kind| Duration::from_secs(u64::from(self.input(FieldId::Minutes(kind)).value()) * 60);
        Settings {
            work_sessions_until_long_break: self.input(FieldId::LongBreakInterval).value(),
            show_progress_bar: self.input(FieldId::ShowProgressBar).as_bool(),
            durations: KindMap::from_fn(minutes),
            notification: NotificationSettings {
                sound: self.input(FieldId::SoundNotification).as_bool(),
                push: self.input(FieldId::PushNotification).as_bool(),
            },
            auto_start: KindMap::from_fn(|kind| self.input(FieldId::AutoStart(kind)).as_bool()),
        }
    }
}

fn build_fields(settings: &Settings) -> Vec<FormField> {
    use SessionKind::{Break, LongBreak, Work};

    vec![
        FormField::number(
            FieldId::Minutes(Work),
            "minutes: Pomodoro",
            whole_minutes(settings.duration(Work)),
            MINUTES_BOUNDS,
        ),
        FormField::number(
            FieldId::Minutes(Break),
            "minutes: Break",
            whole_minutes(settings.duration(Break)),
            MINUTES_BOUNDS,
        ),
        FormField::number(
            FieldId::Minutes(LongBreak),
            "minutes: Long Break",
            whole_minutes(settings.duration(LongBreak)),
            MINUTES_BOUNDS,
        ),
        FormField::number(
            FieldId::LongBreakInterval,
            "Long Break interval",
            settings.work_sessions_until_long_break,
            INTERVAL_BOUNDS,
        ),
        FormField::toggle(FieldId::AutoStart(Work), "Auto start: Pomodoro", settings.auto_start[Work]),
        FormField::toggle(FieldId::AutoStart(Break), "Auto start: Break", settings.auto_start[Break]),
        FormField::toggle(
            FieldId::AutoStart(LongBreak),
            "Auto start: Long Break",
            settings.auto_start[LongBreak],
        ),
        FormField::toggle(FieldId::SoundNotification, "Sound notification", settings.notification.sound),
        FormField::toggle(FieldId::PushNotification, "Push notification", settings.notification.push),
        FormField::toggle(FieldId::ShowProgressBar, "Show progress bar", settings.show_progress_bar),
    ]
}
