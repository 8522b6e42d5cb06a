//! # pomocycle Core Library
//!
//! This library provides the core logic for the pomocycle Pomodoro timer.
//! The terminal binary is a thin layer that classifies keys, measures time,
//! renders views, and delivers notifications on behalf of this crate.
//!
//! ## Architecture
//!
//! - **Scheduler**: decides which session kind follows which
//! - **Timer**: a tick-driven countdown that advances the scheduler on expiry
//! - **Settings**: TOML-persisted preferences and their editable form
//! - **Pages/Router**: the timer and settings pages and navigation between them
//!
//! ## Key Components
//!
//! - [`SessionScheduler`]: work/break/long-break policy
//! - [`TimerController`]: countdown state machine
//! - [`SettingsStore`]: settings persistence
//! - [`App`]: event dispatch to the active page

pub mod app;
pub mod effects;
pub mod error;
pub mod events;
pub mod pages;
pub mod router;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod timer;

pub use app::{App, Flow};
pub use effects::{NoopEffects, SideEffects};
pub use error::{ConfigError, CoreError, RouterError};
pub use events::Event;
pub use pages::{AppEvent, KeyAction, PageView, SettingsView, TimerView};
pub use router::{PageKey, Router};
pub use scheduler::SessionScheduler;
pub use session::{KindMap, SessionCatalog, SessionDescriptor, SessionKind};
pub use settings::{Settings, SettingsForm, SettingsStore, TomlFileBackend};
pub use timer::{TimerController, TimerState};
