//! Session scheduling.
//!
//! The scheduler decides which kind of session comes next. Work always
//! alternates with a rest; every `work_sessions_until_long_break` completed
//! work sessions the rest is a long break instead of a short one.
//!
//! Manual navigation ([`SessionScheduler::set_kind`],
//! [`SessionScheduler::cycle_kind`]) bypasses the policy and leaves the
//! counters alone.

use std::time::Duration;

use tracing::debug;

use crate::session::{KindMap, SessionDescriptor, SessionKind};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct SessionScheduler {
    settings: Settings,
    current: SessionKind,
    /// Kind of the last session that was advanced past. `None` until the first advance.
    previous: Option<SessionKind>,
    completed: KindMap<u32>,
}

impl SessionScheduler {
    /// Starts on a work session with all counters at zero.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            current: SessionKind::Work,
            previous: None,
            completed: KindMap::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current(&self) -> &'static SessionDescriptor {
        self.current.descriptor()
    }

    pub fn current_kind(&self) -> SessionKind {
        self.current
    }

    pub fn previous_kind(&self) -> Option<SessionKind> {
        self.previous
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Configured duration of the current session.
    pub fn duration(&self) -> Duration {
        self.settings.duration(self.current)
    }

    pub fn completed(&self, kind: SessionKind) -> u32 {
        self.completed[kind]
    }

    pub fn total_work_sessions(&self) -> u32 {
        self.completed[SessionKind::Work]
    }

    /// Work sessions left before the next long break.
    ///
    /// `None` when long breaks are disabled (interval of zero).
    pub fn sessions_until_long_break(&self) -> Option<u32> {
        let interval = self.settings.work_sessions_until_long_break;
        if interval == 0 {
            return None;
        }
        Some(interval - self.total_work_sessions() % interval)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Complete the current session and move to the next one.
    pub fn advance(&mut self) -> SessionKind {
        self.completed[self.current] = self.completed[self.current].saturating_add(1);
        self.previous = Some(self.current);

        let next = self.next_kind();
        debug!(
            from = ?self.current,
            to = ?next,
            work_completed = self.total_work_sessions(),
            "advanced session"
        );
        self.current = next;
        next
    }

    pub fn set_kind(&mut self, kind: SessionKind) {
        self.current = kind;
    }

    /// Move `offset` kinds through the navigation order, wrapping at both ends.
    pub fn cycle_kind(&mut self, offset: i32) -> SessionKind {
        let target = self.current.cycle(offset);
        self.set_kind(target);
        target
    }

    /// Replace the settings snapshot. Kinds and counters are kept.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn next_kind(&self) -> SessionKind {
        if self.previous != Some(SessionKind::Work) {
            return SessionKind::Work;
        }

        // An interval of zero disables long breaks.
        let interval = self.settings.work_sessions_until_long_break;
        if interval == 0 {
            return SessionKind::Break;
        }

        if self.total_work_sessions() % interval == 0 {
            SessionKind::LongBreak
        } else {
            SessionKind::Break
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionKind::{Break, LongBreak, Work};

    fn scheduler_with_interval(interval: u32) -> SessionScheduler {
        SessionScheduler::new(Settings {
            work_sessions_until_long_break: interval,
            ..Settings::default()
        })
    }

    #[test]
    fn starts_fresh_on_work() {
        let s = scheduler_with_interval(4);
        assert_eq!(s.current_kind(), Work);
        assert_eq!(s.previous_kind(), None);
        assert_eq!(s.total_work_sessions(), 0);
        assert_eq!(s.duration(), Duration::from_secs(25 * 60));
        assert_eq!(s.current().title, "Pomodoro");
    }

    #[test]
    fn fourth_work_session_earns_long_break() {
        let mut s = scheduler_with_interval(4);
        let sequence: Vec<_> = (0..10).map(|_| s.advance()).collect();
        assert_eq!(
            sequence,
            vec![Break, Work, Break, Work, Break, Work, LongBreak, Work, Break, Work]
        );
        assert_eq!(s.total_work_sessions(), 5);
        assert_eq!(s.completed(Break), 4);
        assert_eq!(s.completed(LongBreak), 1);
    }

    #[test]
    fn zero_interval_never_long_breaks() {
        let mut s = scheduler_with_interval(0);
        for _ in 0..20 {
            let next = s.advance();
            assert_ne!(next, LongBreak);
        }
        assert_eq!(s.sessions_until_long_break(), None);
    }

    #[test]
    fn interval_of_one_always_long_breaks() {
        let mut s = scheduler_with_interval(1);
        assert_eq!(s.advance(), LongBreak);
        assert_eq!(s.advance(), Work);
        assert_eq!(s.advance(), LongBreak);
    }

    #[test]
    fn sessions_until_long_break_counts_down() {
        let mut s = scheduler_with_interval(4);
        assert_eq!(s.sessions_until_long_break(), Some(4));
        s.advance(); // work done
        assert_eq!(s.sessions_until_long_break(), Some(3));
        s.advance(); // break done
        assert_eq!(s.sessions_until_long_break(), Some(3));
    }

    #[test]
    fn set_kind_leaves_counters_and_previous() {
        let mut s = scheduler_with_interval(4);
        s.advance();
        assert_eq!(s.previous_kind(), Some(Work));
        s.set_kind(LongBreak);
        assert_eq!(s.current_kind(), LongBreak);
        assert_eq!(s.previous_kind(), Some(Work));
        assert_eq!(s.total_work_sessions(), 1);
        assert_eq!(s.completed(Break), 0);
    }

    #[test]
    fn rest_after_manual_override_returns_to_work() {
        let mut s = scheduler_with_interval(4);
        s.set_kind(Break);
        // previous is still None, so the next session is work.
        assert_eq!(s.advance(), Work);
        assert_eq!(s.completed(Break), 1);
    }

    #[test]
    fn manual_work_after_work_still_yields_rest() {
        let mut s = scheduler_with_interval(4);
        s.advance(); // Work -> Break
        s.set_kind(Work);
        assert_eq!(s.advance(), Break);
        assert_eq!(s.total_work_sessions(), 2);
    }

    #[test]
    fn cycle_kind_wraps() {
        let mut s = scheduler_with_interval(4);
        assert_eq!(s.cycle_kind(-1), LongBreak);
        assert_eq!(s.cycle_kind(1), Work);
        assert_eq!(s.cycle_kind(1), Break);
        assert_eq!(s.cycle_kind(1), LongBreak);
        assert_eq!(s.cycle_kind(1), Work);
    }

    #[test]
    fn apply_settings_keeps_counters() {
        let mut s = scheduler_with_interval(4);
        s.advance();
        let mut settings = Settings::default();
        settings.durations[Break] = Duration::from_secs(7 * 60);
        s.apply_settings(settings);
        assert_eq!(s.total_work_sessions(), 1);
        assert_eq!(s.current_kind(), Break);
        assert_eq!(s.duration(), Duration::from_secs(7 * 60));
    }
}
