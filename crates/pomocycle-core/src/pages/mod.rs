//! Page controllers and the event vocabulary they speak.
//!
//! Raw key codes never reach the core. The terminal layer classifies keys
//! into [`KeyAction`]s and measures real time into [`AppEvent::Tick`]s.

mod settings;
mod timer;

use std::time::Duration;

use serde::Serialize;

use crate::router::PageKey;
use crate::session::{SessionDescriptor, SessionKind};
use crate::settings::{FormField, SettingsStore};
use crate::timer::TimerState;

pub use settings::SettingsPage;
pub use timer::{TimerPage, PROGRESS_BAR_MAX_WIDTH};

/// A classified key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    /// Start/stop on the timer page, flip a toggle on the settings page.
    Toggle,
    Select,
    Reset,
    Next,
    Help,
    OpenSettings,
    Back,
    Quit,
}

/// One discrete input delivered to the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Real time elapsed since the previous tick.
    Tick(Duration),
    Key(KeyAction),
    Resize { width: u16, height: u16 },
}

/// What a page wants to happen after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Navigate(PageKey),
    Quit,
}

/// State shared by every page.
pub struct PageContext {
    pub store: SettingsStore,
}

pub trait PageController {
    fn key(&self) -> PageKey;

    /// Called each time the router switches to this page.
    fn enter(&mut self, ctx: &mut PageContext);

    fn handle(&mut self, event: &AppEvent, ctx: &mut PageContext) -> Transition;

    fn view(&self) -> PageView;
}

/// Render-ready snapshot of the active page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Timer(TimerView),
    Settings(SettingsView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTab {
    pub descriptor: &'static SessionDescriptor,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerView {
    pub tabs: Vec<SessionTab>,
    pub kind: SessionKind,
    pub state: TimerState,
    pub remaining: Duration,
    /// `None` when the progress bar is turned off.
    pub progress: Option<f64>,
    pub progress_width: u16,
    pub total_work_sessions: u32,
    /// `None` when long breaks are disabled.
    pub sessions_until_long_break: Option<u32>,
    pub show_help: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub fields: Vec<FormField>,
    pub cursor: usize,
    pub show_help: bool,
}
