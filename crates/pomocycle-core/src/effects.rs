//! Side-effect boundary.
//!
//! The timer asks for a desktop notification and a sound when a session
//! expires. Implementations must return immediately: queue the request and
//! do the work elsewhere. Failures are the implementation's problem and never
//! reach the state machine.

/// Fire-and-forget requests issued on session expiry.
pub trait SideEffects {
    fn notify(&self, title: &str, message: &str);

    fn play_sound(&self);
}

/// Drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffects;

impl SideEffects for NoopEffects {
    fn notify(&self, _title: &str, _message: &str) {}

    fn play_sound(&self) {}
}
