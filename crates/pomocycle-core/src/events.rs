use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionKind;
use crate::timer::TimerState;

/// Every timer state change produces an Event.
/// Pages log them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        kind: SessionKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        kind: SessionKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        kind: SessionKind,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    /// The countdown expired (or was skipped) and the scheduler advanced.
    SessionCompleted {
        completed: SessionKind,
        next: SessionKind,
        total_work_sessions: u32,
        /// State the timer is left in for the next session.
        state: TimerState,
        at: DateTime<Utc>,
    },
    /// Manual navigation to another kind.
    SessionChanged {
        from: SessionKind,
        to: SessionKind,
        at: DateTime<Utc>,
    },
    /// Remaining time was adjusted by hand.
    TimeAdjusted {
        kind: SessionKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::SessionChanged {
            from: SessionKind::Work,
            to: SessionKind::LongBreak,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SessionChanged");
        assert_eq!(json["to"], "long_break");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
