//! Countdown controller.
//!
//! The controller is driven entirely by the caller: `tick()` receives the
//! elapsed time since the previous tick. There are no internal threads.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --toggle--> Running --toggle--> Paused --toggle--> Running
//! Running --tick reaches zero--> (expired) --> Idle | Running
//! any --reset/next/set_kind--> Idle
//! ```
//!
//! On expiry the scheduler advances exactly once, the notification and sound
//! requests go out, and the countdown reloads with the next session's
//! duration. It keeps running only if it was running and the next kind has
//! auto-start enabled.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::effects::SideEffects;
use crate::events::Event;
use crate::scheduler::SessionScheduler;
use crate::session::{SessionDescriptor, SessionKind};
use crate::settings::Settings;

const MINUTE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Loaded but not started since the last reset or kind change.
    Idle,
    Running,
    Paused,
}

/// Countdown state machine on top of a [`SessionScheduler`].
pub struct TimerController {
    scheduler: SessionScheduler,
    effects: Box<dyn SideEffects>,
    state: TimerState,
    remaining: Duration,
    /// Value `remaining` started from, for progress.
    initial: Duration,
}

impl TimerController {
    /// Create a controller on a fresh work session, `Idle`.
    pub fn new(settings: Settings, effects: Box<dyn SideEffects>) -> Self {
        let scheduler = SessionScheduler::new(settings);
        let duration = scheduler.duration();
        Self {
            scheduler,
            effects,
            state: TimerState::Idle,
            remaining: duration,
            initial: duration,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    pub fn scheduler(&self) -> &SessionScheduler {
        &self.scheduler
    }

    pub fn current(&self) -> &'static SessionDescriptor {
        self.scheduler.current()
    }

    pub fn settings(&self) -> &Settings {
        self.scheduler.settings()
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        if self.initial.is_zero() {
            return 0.0;
        }
        let elapsed = self.initial.saturating_sub(self.remaining);
        (elapsed.as_secs_f64() / self.initial.as_secs_f64()).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Reload the current session's duration and stop.
    pub fn reset(&mut self) -> Event {
        self.reset_to(self.scheduler.duration());
        Event::TimerReset {
            kind: self.scheduler.current_kind(),
            duration_ms: millis(self.remaining),
            at: Utc::now(),
        }
    }

    /// Start or resume when stopped, pause when running.
    pub fn toggle(&mut self) -> Event {
        let kind = self.scheduler.current_kind();
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                debug!(?kind, remaining_ms = millis(self.remaining), "timer started");
                Event::TimerStarted {
                    kind,
                    remaining_ms: millis(self.remaining),
                    at: Utc::now(),
                }
            }
            TimerState::Running => {
                self.state = TimerState::Paused;
                debug!(?kind, remaining_ms = millis(self.remaining), "timer paused");
                Event::TimerPaused {
                    kind,
                    remaining_ms: millis(self.remaining),
                    at: Utc::now(),
                }
            }
        }
    }

    /// Count down by `elapsed`. Returns `Some(Event::SessionCompleted)` on expiry.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        debug_assert!(!self.remaining.is_zero(), "tick on an already expired countdown");

        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            return Some(self.expire());
        }
        None
    }

    /// Skip to the next session without notifying.
    pub fn next(&mut self) -> Event {
        let completed = self.scheduler.current_kind();
        let next = self.scheduler.advance();
        self.reset_to(self.scheduler.duration());
        Event::SessionCompleted {
            completed,
            next,
            total_work_sessions: self.scheduler.total_work_sessions(),
            state: self.state,
            at: Utc::now(),
        }
    }

    pub fn set_kind(&mut self, kind: SessionKind) -> Event {
        let from = self.scheduler.current_kind();
        self.scheduler.set_kind(kind);
        self.reset_to(self.scheduler.duration());
        Event::SessionChanged {
            from,
            to: kind,
            at: Utc::now(),
        }
    }

    /// Navigate `offset` kinds left (negative) or right (positive).
    pub fn cycle_kind(&mut self, offset: i32) -> Event {
        let target = self.scheduler.current_kind().cycle(offset);
        self.set_kind(target)
    }

    pub fn add_minutes(&mut self, minutes: u32) -> Event {
        let delta = MINUTE * minutes;
        self.remaining = self.remaining.saturating_add(delta);
        self.initial = self.initial.saturating_add(delta);
        self.adjusted()
    }

    /// Take `minutes` off the countdown. Reaching zero expires the session
    /// exactly as a tick would.
    pub fn subtract_minutes(&mut self, minutes: u32) -> Event {
        let delta = MINUTE * minutes;
        if self.remaining <= delta {
            return self.expire();
        }
        self.remaining -= delta;
        self.initial = self.initial.saturating_sub(delta).max(self.remaining);
        self.adjusted()
    }

    /// Replace the settings and reload the current kind's duration.
    pub fn apply_settings(&mut self, settings: Settings) -> Event {
        self.scheduler.apply_settings(settings);
        self.reset()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reset_to(&mut self, duration: Duration) {
        self.state = TimerState::Idle;
        self.remaining = duration;
        self.initial = duration;
    }

    fn adjusted(&self) -> Event {
        Event::TimeAdjusted {
            kind: self.scheduler.current_kind(),
            remaining_ms: millis(self.remaining),
            at: Utc::now(),
        }
    }

    fn expire(&mut self) -> Event {
        let was_running = self.is_running();
        let completed = self.scheduler.current_kind();
        let next = self.scheduler.advance();

        let descriptor = next.descriptor();
        let notification = self.scheduler.settings().notification;
        if notification.push {
            self.effects
                .notify(descriptor.notification.title, descriptor.notification.message);
        }
        if notification.sound {
            self.effects.play_sound();
        }

        self.reset_to(self.scheduler.duration());
        if was_running && self.scheduler.settings().auto_starts(next) {
            self.state = TimerState::Running;
        }

        info!(
            ?completed,
            ?next,
            total_work_sessions = self.scheduler.total_work_sessions(),
            state = ?self.state,
            "session expired"
        );
        Event::SessionCompleted {
            completed,
            next,
            total_work_sessions: self.scheduler.total_work_sessions(),
            state: self.state,
            at: Utc::now(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
